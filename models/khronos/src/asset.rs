use json::JsonValue;

use crate::glb::FormatError;

pub const SIGNATURE_KEY: &str = "signature";
pub const TIMESTAMP_KEY: &str = "signatureTimestamp";

/// The parts of a glTF `asset` object this crate reads or writes.
/// Any other keys in the object are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Asset {
	pub version: Option<String>,
	pub min_version: Option<String>,
	pub copyright: Option<String>,
	pub signature: Option<String>,
	pub generator: Option<String>,
	/// Seconds since the Unix epoch
	pub signature_timestamp: Option<u64>,
}

impl Asset {
	pub fn from_json(asset: &JsonValue) -> Asset {
		Asset {
			version: string_field(asset, "version"),
			min_version: string_field(asset, "minVersion"),
			copyright: string_field(asset, "copyright"),
			signature: string_field(asset, SIGNATURE_KEY),
			generator: string_field(asset, "generator"),
			signature_timestamp: asset[TIMESTAMP_KEY].as_u64(),
		}
	}

	/// Writes every populated field into `asset`.
	/// Existing keys keep their position, new keys are appended in field order.
	pub fn apply(&self, asset: &mut JsonValue) -> Result<(), FormatError> {
		if !asset.is_object() {
			return Err(FormatError::NotAnObject("asset"));
		}

		let fields = [
			("version", &self.version),
			("minVersion", &self.min_version),
			("copyright", &self.copyright),
			(SIGNATURE_KEY, &self.signature),
			("generator", &self.generator),
		];

		for (key, value) in fields {
			if let Some(value) = value {
				asset.insert(key, value.as_str())?;
			}
		}

		if let Some(timestamp) = self.signature_timestamp {
			asset.insert(TIMESTAMP_KEY, timestamp)?;
		}

		Ok(())
	}
}

fn string_field(obj: &JsonValue, key: &str) -> Option<String> {
	obj[key].as_str().map(str::to_owned)
}
