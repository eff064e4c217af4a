use std::io::{
	copy,
	repeat,
	Read,
	Result,
	Write
};

use crate::padding_for;

pub trait WriteBinExt: Write {
	/// Writes `count` copies of `fill`
	#[inline]
	fn write_padding(&mut self, count: usize, fill: u8) -> Result<()> {
		copy(&mut repeat(fill).take(count as u64), self)?;

		Ok(())
	}

	/// Writes `data` followed by enough `fill` bytes to end on a 4-byte boundary.
	/// Returns the number of padding bytes written.
	#[inline]
	fn write_aligned(&mut self, data: &[u8], fill: u8) -> Result<usize> {
		let pad = padding_for(data.len(), 4);

		self.write_all(data)?;
		self.write_padding(pad, fill)?;

		Ok(pad)
	}
}

impl<W> WriteBinExt for W
where
	W: Write + ?Sized,
{
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_write_aligned() {
		let mut out: Vec<u8> = vec![];
		assert_eq!(3, out.write_aligned(b"{}\n\n\n", b' ').unwrap());
		assert_eq!(b"{}\n\n\n   ".to_vec(), out);

		let mut out: Vec<u8> = vec![];
		assert_eq!(0, out.write_aligned(&[1, 2, 3, 4], 0).unwrap());
		assert_eq!(vec![1, 2, 3, 4], out);
	}

	#[test]
	fn test_write_padding() {
		let mut out: Vec<u8> = vec![];
		out.write_padding(2, 0).unwrap();
		assert_eq!(vec![0, 0], out);

		out.write_padding(0, 0xFF).unwrap();
		assert_eq!(2, out.len());

		out.write_padding(10_000, b' ').unwrap();
		assert_eq!(10_002, out.len());
		assert!(out[2..].iter().all(|&b| b == b' '));
	}
}
