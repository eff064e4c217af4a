//! Provenance markers stored in `asset.signature`.
//!
//! A marker is an opaque tag agreed on by whoever writes and whoever reads
//! the container. Anyone able to edit the JSON chunk can forge or strip it,
//! so it labels a file and proves nothing about it.

#[cfg(all(feature = "import", feature = "export"))]
use json::JsonValue;

#[cfg(feature = "import")]
use log::debug;

#[cfg(feature = "import")]
use crate::{
	asset::Asset,
	glb::{
		FormatError,
		Glb
	}
};

pub const DEFAULT_MARKER: &str = "DM-9937-SECURE-CODE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerConfig {
	pub value: String,
	pub generator: Option<String>,
	/// Written as `asset.signatureTimestamp`, ignored by verification
	pub timestamp: Option<u64>,
}

impl Default for MarkerConfig {
	fn default() -> Self {
		MarkerConfig::new(DEFAULT_MARKER)
	}
}

impl MarkerConfig {
	pub fn new<S>(value: S) -> MarkerConfig
	where
		S: Into<String>,
	{
		MarkerConfig {
			value: value.into(),
			generator: None,
			timestamp: None,
		}
	}

	pub fn with_generator<S>(mut self, generator: S) -> MarkerConfig
	where
		S: Into<String>,
	{
		self.generator = Some(generator.into());
		self
	}

	pub fn with_timestamp(mut self, secs: u64) -> MarkerConfig {
		self.timestamp = Some(secs);
		self
	}

	/// Returns a copy of `buffer` with this marker written into its JSON chunk.
	/// The BIN chunk, if any, is carried over byte for byte.
	#[cfg(all(feature = "import", feature = "export"))]
	pub fn inject(&self, buffer: &[u8]) -> Result<Vec<u8>, FormatError> {
		let glb = Glb::read(buffer)?;
		let mut doc = glb.json_value()?;

		if !doc.has_key("asset") {
			doc.insert("asset", JsonValue::new_object())?;
		}

		let mut asset = Asset::from_json(&doc["asset"]);
		asset.signature = Some(self.value.clone());

		if let Some(ref generator) = self.generator {
			asset.generator = Some(generator.clone());
		}

		if self.timestamp.is_some() {
			asset.signature_timestamp = self.timestamp;
		}

		asset.apply(&mut doc["asset"])?;

		let marked = Glb::from_json(glb.header.version, &doc, glb.bin.map(|bin| bin.data))?;
		debug!("marked container: {} -> {} bytes", buffer.len(), marked.byte_length());

		marked.to_vec()
	}
}

/// Writes `marker` (and `generator`, if given) into the container's `asset` object
#[cfg(all(feature = "import", feature = "export"))]
pub fn inject(buffer: &[u8], marker: &str, generator: Option<&str>) -> Result<Vec<u8>, FormatError> {
	let mut config = MarkerConfig::new(marker);
	config.generator = generator.map(str::to_owned);

	config.inject(buffer)
}

/// Returns the current `asset.signature`, or `None` if the buffer is unmarked or unreadable
#[cfg(feature = "import")]
pub fn read_marker(buffer: &[u8]) -> Option<String> {
	match signature(buffer) {
		Ok(signature) => signature,
		Err(e) => {
			debug!("not a readable GLB container: {}", e);
			None
		},
	}
}

/// Checks whether `buffer` carries `marker`. Never fails: malformed input is simply unmarked.
#[cfg(feature = "import")]
pub fn has_marker(buffer: &[u8], marker: &str) -> bool {
	read_marker(buffer).as_deref() == Some(marker)
}

#[cfg(feature = "import")]
fn signature(buffer: &[u8]) -> Result<Option<String>, FormatError> {
	let doc = Glb::read(buffer)?.json_value()?;

	Ok(Asset::from_json(&doc["asset"]).signature)
}
