#[cfg(feature = "io_ext")]
pub mod io_ext;

/// Converts a 4-byte string into a 32-bit little endian integer.
/// Byte strings longer than 4 bytes are truncated.
#[macro_export]
macro_rules! rtag4 {
	($b4: literal) => {
		u32::from_le_bytes([$b4[0], $b4[1], $b4[2], $b4[3]])
	}
}

/// Number of bytes needed to bring `len` up to a multiple of `align`
pub const fn padding_for(len: usize, align: usize) -> usize {
	(align - len % align) % align
}

/// Rounds `len` up to the next multiple of 4
pub const fn align4(len: usize) -> usize {
	len + padding_for(len, 4)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tags() {
		assert_eq!(0x46546C67, rtag4!(b"glTF"));
		assert_eq!(0x4E4F534A, rtag4!(b"JSON"));
		assert_eq!(0x004E4942, rtag4!(b"BIN\x00"));
	}

	#[test]
	fn test_padding() {
		assert_eq!(0, padding_for(0, 4));
		assert_eq!(3, padding_for(1, 4));
		assert_eq!(2, padding_for(6, 4));
		assert_eq!(1, padding_for(7, 4));
		assert_eq!(0, padding_for(8, 4));
		assert_eq!(28, align4(25));
		assert_eq!(28, align4(28));
	}
}
