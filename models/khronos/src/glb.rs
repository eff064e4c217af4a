use byteorder::{
	ByteOrder,
	LE
};

#[cfg(feature = "import")]
use byteorder::ReadBytesExt;

#[cfg(feature = "export")]
use byteorder::WriteBytesExt;

use json::JsonValue;
use log::trace;

#[cfg(feature = "import")]
use log::debug;

#[cfg(feature = "export")]
use log::warn;

use std::{
	io,
	str::{
		from_utf8,
		Utf8Error
	}
};

use thiserror::Error;

use glbmark_core::{
	align4,
	rtag4
};

#[cfg(feature = "export")]
use glbmark_core::io_ext::WriteBinExt;

pub const MAGIC: u32 = rtag4!(b"glTF");
pub const VERSION: u32 = 2;
pub const HEADER_SIZE: usize = 12;
pub const CHUNK_HEADER_SIZE: usize = 8;

#[derive(Debug, Error)]
pub enum FormatError {
	#[error("I/O error")]
	Io {
		#[from]
		source: io::Error,
	},
	#[error("bad magic: {0:08X}")]
	Magic(u32),
	#[error("truncated: {declared} bytes expected, {actual} available")]
	Truncated {
		declared: usize,
		actual: usize,
	},
	#[error("missing JSON chunk")]
	MissingJson,
	#[error("invalid JSON chunk: not UTF-8")]
	Utf8(#[from] Utf8Error),
	#[error("invalid JSON chunk: {0}")]
	Json(#[from] json::Error),
	#[error("invalid JSON chunk: {0} is not an object")]
	NotAnObject(&'static str),
	#[error("container too large: {0} bytes")]
	TooLarge(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
	pub magic: u32,
	pub version: u32,
	pub length: u32,
}

impl Header {
	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> Result<Header, FormatError>
	where
		R: ReadBytesExt,
	{
		let magic = buf.read_u32::<LE>()?;
		if magic != MAGIC {
			return Err(FormatError::Magic(magic));
		}

		Ok(Header {
			magic: magic,
			version: buf.read_u32::<LE>()?,
			length: buf.read_u32::<LE>()?,
		})
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> io::Result<()>
	where
		W: WriteBytesExt,
	{
		buf.write_u32::<LE>(self.magic)?;
		buf.write_u32::<LE>(self.version)?;
		buf.write_u32::<LE>(self.length)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkType {
	Json,
	Binary,
	Unknown(u32),
}

impl ChunkType {
	pub const JSON: u32 = rtag4!(b"JSON");
	pub const BIN: u32 = rtag4!(b"BIN\x00");

	pub fn from_u32(tag: u32) -> ChunkType {
		match tag {
			ChunkType::JSON => ChunkType::Json,
			ChunkType::BIN => ChunkType::Binary,
			_ => ChunkType::Unknown(tag),
		}
	}

	pub fn as_u32(self) -> u32 {
		match self {
			ChunkType::Json => ChunkType::JSON,
			ChunkType::Binary => ChunkType::BIN,
			ChunkType::Unknown(tag) => tag,
		}
	}

	/// Byte used to pad chunk data of this type to 4-byte alignment
	pub fn fill(self) -> u8 {
		match self {
			ChunkType::Json => b' ',
			_ => 0,
		}
	}
}

/// A chunk borrowed from the container it was read out of
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkRef<'a> {
	pub offset: usize,
	pub length: u32,
	pub kind: ChunkType,
	pub data: &'a [u8],
}

impl ChunkRef<'_> {
	pub fn to_chunk(&self) -> Chunk {
		Chunk {
			offset: self.offset,
			length: self.length,
			kind: self.kind,
			data: self.data.to_vec(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
	/// Absolute offset of the chunk header within the container
	pub offset: usize,
	pub length: u32,
	pub kind: ChunkType,
	pub data: Vec<u8>,
}

impl Chunk {
	/// Length of the chunk data once padded to 4 bytes
	pub fn padded_length(&self) -> usize {
		align4(self.data.len())
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> Result<(), FormatError>
	where
		W: WriteBytesExt,
	{
		buf.write_u32::<LE>(to_u32(self.padded_length())?)?;
		buf.write_u32::<LE>(self.kind.as_u32())?;
		buf.write_aligned(&self.data, self.kind.fill())?;

		Ok(())
	}
}

/// Walks the chunk sequence of a container, starting right after the header.
///
/// The slice handed to [`Chunks::new`] must already be cut to the declared
/// container length; iteration stops at its end. A chunk whose header or data
/// runs past the end yields [`FormatError::Truncated`] and ends the iteration.
pub struct Chunks<'a> {
	buf: &'a [u8],
	offset: usize,
	done: bool,
}

impl<'a> Chunks<'a> {
	pub fn new(container: &'a [u8]) -> Chunks<'a> {
		Chunks {
			buf: container,
			offset: HEADER_SIZE,
			done: false,
		}
	}

	fn truncated(&mut self, declared: usize) -> Option<Result<ChunkRef<'a>, FormatError>> {
		self.done = true;

		Some(Err(FormatError::Truncated {
			declared: declared,
			actual: self.buf.len(),
		}))
	}
}

impl<'a> Iterator for Chunks<'a> {
	type Item = Result<ChunkRef<'a>, FormatError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.offset >= self.buf.len() {
			return None;
		}

		let start = self.offset;
		let body = start + CHUNK_HEADER_SIZE;
		if body > self.buf.len() {
			return self.truncated(body);
		}

		let length = LE::read_u32(&self.buf[start..start + 4]);
		let kind = ChunkType::from_u32(LE::read_u32(&self.buf[start + 4..body]));

		let end = body.saturating_add(length as usize);
		if end > self.buf.len() {
			return self.truncated(end);
		}

		trace!("{:?} chunk at offset {}, {} bytes", kind, start, length);
		self.offset = end;

		Some(Ok(ChunkRef {
			offset: start,
			length: length,
			kind: kind,
			data: &self.buf[body..end],
		}))
	}
}

/// A parsed GLB container: the first JSON chunk and, if present, the first BIN chunk
#[derive(Clone, Debug, PartialEq)]
pub struct Glb {
	pub header: Header,
	pub json: Chunk,
	pub bin: Option<Chunk>,
}

impl Glb {
	/// Builds a container from raw JSON text and optional binary data, padding both chunks
	#[cfg(feature = "export")]
	pub fn new(version: u32, json: Vec<u8>, bin: Option<Vec<u8>>) -> Result<Glb, FormatError> {
		let json = Chunk {
			offset: HEADER_SIZE,
			length: 0,
			kind: ChunkType::Json,
			data: json,
		};

		let bin = bin.map(|data| {
			if data.len() % 4 != 0 {
				warn!("BIN chunk of {} bytes is not 4-byte aligned, padding it", data.len());
			}

			Chunk {
				offset: HEADER_SIZE + CHUNK_HEADER_SIZE + json.padded_length(),
				length: 0,
				kind: ChunkType::Binary,
				data: data,
			}
		});

		let mut glb = Glb {
			header: Header {
				magic: MAGIC,
				version: version,
				length: 0,
			},
			json: json,
			bin: bin,
		};

		glb.json.data.resize(glb.json.padded_length(), ChunkType::Json.fill());
		glb.json.length = to_u32(glb.json.data.len())?;

		if let Some(ref mut bin) = glb.bin {
			bin.data.resize(bin.padded_length(), ChunkType::Binary.fill());
			bin.length = to_u32(bin.data.len())?;
		}

		glb.header.length = to_u32(glb.byte_length())?;

		Ok(glb)
	}

	/// Builds a container around a serialized glTF document
	#[cfg(feature = "export")]
	pub fn from_json(version: u32, doc: &JsonValue, bin: Option<Vec<u8>>) -> Result<Glb, FormatError> {
		Glb::new(version, doc.dump().into_bytes(), bin)
	}

	#[cfg(feature = "import")]
	pub fn read(buffer: &[u8]) -> Result<Glb, FormatError> {
		if buffer.len() < HEADER_SIZE {
			return Err(FormatError::Truncated {
				declared: HEADER_SIZE,
				actual: buffer.len(),
			});
		}

		let header = Header::read(&mut &buffer[..HEADER_SIZE])?;
		let length = header.length as usize;

		if buffer.len() < length {
			return Err(FormatError::Truncated {
				declared: length,
				actual: buffer.len(),
			});
		}

		if length < HEADER_SIZE {
			return Err(FormatError::Truncated {
				declared: HEADER_SIZE,
				actual: length,
			});
		}

		let mut json = None;
		let mut bin = None;

		for chunk in Chunks::new(&buffer[..length]) {
			let chunk = chunk?;

			match chunk.kind {
				ChunkType::Json if json.is_none() => json = Some(chunk.to_chunk()),
				ChunkType::Binary if bin.is_none() => bin = Some(chunk.to_chunk()),
				kind => debug!("skipping {:?} chunk at offset {}", kind, chunk.offset),
			}
		}

		Ok(Glb {
			header: header,
			json: json.ok_or(FormatError::MissingJson)?,
			bin: bin,
		})
	}

	/// Total size of the container as [`Glb::write`] lays it out
	pub fn byte_length(&self) -> usize {
		let mut length = HEADER_SIZE + CHUNK_HEADER_SIZE + self.json.padded_length();

		if let Some(ref bin) = self.bin {
			length += CHUNK_HEADER_SIZE + bin.padded_length();
		}

		length
	}

	/// The JSON chunk as text, without trailing padding
	pub fn json_text(&self) -> Result<&str, FormatError> {
		// some exporters pad with NULs instead of spaces
		Ok(from_utf8(&self.json.data)?.trim_end_matches(|c: char| c == ' ' || c == '\0'))
	}

	/// Parses the JSON chunk into a glTF document
	pub fn json_value(&self) -> Result<JsonValue, FormatError> {
		let doc = json::parse(self.json_text()?)?;
		if !doc.is_object() {
			return Err(FormatError::NotAnObject("root"));
		}

		Ok(doc)
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> Result<(), FormatError>
	where
		W: WriteBytesExt,
	{
		let header = Header {
			magic: MAGIC,
			version: self.header.version,
			length: to_u32(self.byte_length())?,
		};

		header.write(buf)?;
		self.json.write(buf)?;

		if let Some(ref bin) = self.bin {
			bin.write(buf)?;
		}

		Ok(())
	}

	#[cfg(feature = "export")]
	pub fn to_vec(&self) -> Result<Vec<u8>, FormatError> {
		let mut out = Vec::with_capacity(self.byte_length());
		self.write(&mut out)?;

		Ok(out)
	}
}

/// Parses a GLB container
#[cfg(feature = "import")]
pub fn parse(buffer: &[u8]) -> Result<Glb, FormatError> {
	Glb::read(buffer)
}

#[cfg(feature = "export")]
fn to_u32(length: usize) -> Result<u32, FormatError> {
	u32::try_from(length).map_err(|_| FormatError::TooLarge(length))
}
