use byteorder::{
	LE,
	WriteBytesExt
};

/// Lays out a GLB container by hand, independently of the crate's writer.
/// JSON is padded with spaces and BIN with zeros.
pub fn glb_bytes(json: &[u8], bin: Option<&[u8]>) -> Vec<u8> {
	let mut json = json.to_vec();
	while json.len() % 4 != 0 {
		json.push(b' ');
	}

	let bin = bin.map(|data| {
		let mut data = data.to_vec();
		while data.len() % 4 != 0 {
			data.push(0);
		}
		data
	});

	let length = 12 + 8 + json.len() + bin.as_ref().map_or(0, |data| 8 + data.len());
	let mut out: Vec<u8> = vec![];

	out.extend_from_slice(b"glTF");
	out.write_u32::<LE>(2).unwrap();
	out.write_u32::<LE>(length as u32).unwrap();

	out.write_u32::<LE>(json.len() as u32).unwrap();
	out.extend_from_slice(b"JSON");
	out.extend_from_slice(&json);

	if let Some(data) = bin {
		out.write_u32::<LE>(data.len() as u32).unwrap();
		out.extend_from_slice(b"BIN\x00");
		out.extend_from_slice(&data);
	}

	out
}
