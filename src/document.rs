//! Typed model of the structural provisioning document.
//!
//! Only `storage.files` and `systemd.units` are interpreted; every other
//! field is carried through untouched via flattened maps, so the builder
//! never drops sections it does not understand (ignition version, passwd,
//! unit enable flags, file ownership, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::embed::looks_like_template;

/// The provisioning config document produced by the builder and consumed
/// by the inspector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnitionDocument {
    #[serde(default, skip_serializing_if = "Storage::is_empty")]
    pub storage: Storage,
    #[serde(default, skip_serializing_if = "Systemd::is_empty")]
    pub systemd: Systemd,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Storage {
    fn is_empty(&self) -> bool {
        self.files.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Systemd {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Systemd {
    fn is_empty(&self) -> bool {
        self.units.is_empty() && self.extra.is_empty()
    }
}

/// One file to be placed on the provisioned machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute, slash-rooted target path.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<FileContents>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileContents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a file entry's content is resolved. Decided once per entry during
/// materialization instead of re-derived by string inspection at each use
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// No inline source; content comes from the asset tree under the
    /// entry's path.
    External,
    /// Inline source containing directive syntax; rendered, then embedded.
    InlineTemplate,
    /// Inline source already in final form (e.g. a remote URL or a prior
    /// data URI); never touched.
    Resolved,
}

impl FileEntry {
    /// Classify this entry's content source per the three-state rule.
    pub fn content_source(&self) -> ContentSource {
        match self.source() {
            None | Some("") => ContentSource::External,
            Some(source) if looks_like_template(source) => ContentSource::InlineTemplate,
            Some(_) => ContentSource::Resolved,
        }
    }

    /// The inline source string, if any.
    pub fn source(&self) -> Option<&str> {
        self.contents.as_ref().and_then(|c| c.source.as_deref())
    }

    /// Replace the content source in place.
    pub fn set_source(&mut self, source: String) {
        self.contents.get_or_insert_with(FileContents::default).source = Some(source);
    }
}

/// One service-manager unit and its configuration overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Dot-suffixed unit name, e.g. `adguard.service`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<DropinEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnitEntry {
    /// Unit name with its final dot-suffix removed; names an overrides
    /// directory `<base>.d/` in the asset tree.
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(base, _)| base)
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropinEntry {
    /// Dropin filename, e.g. `override.conf`.
    pub name: String,
    /// Plaintext contents; empty until materialized from the overrides
    /// tree. Never embedded.
    #[serde(default)]
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: Option<&str>) -> FileEntry {
        FileEntry {
            path: "/etc/motd".to_string(),
            mode: None,
            contents: source.map(|s| FileContents {
                source: Some(s.to_string()),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    #[test]
    fn missing_source_is_external() {
        assert_eq!(entry(None).content_source(), ContentSource::External);
        assert_eq!(entry(Some("")).content_source(), ContentSource::External);
    }

    #[test]
    fn directive_syntax_is_inline_template() {
        assert_eq!(
            entry(Some("{{ root_passwd }}")).content_source(),
            ContentSource::InlineTemplate
        );
    }

    #[test]
    fn plain_source_is_resolved() {
        assert_eq!(
            entry(Some("https://example.com/x")).content_source(),
            ContentSource::Resolved
        );
    }

    #[test]
    fn unit_base_name_strips_final_suffix() {
        let unit = UnitEntry {
            name: "adguard.service".to_string(),
            dropins: Vec::new(),
            extra: Map::new(),
        };
        assert_eq!(unit.base_name(), "adguard");
    }

    #[test]
    fn unit_base_name_without_dot_is_unchanged() {
        let unit = UnitEntry {
            name: "adguard".to_string(),
            dropins: Vec::new(),
            extra: Map::new(),
        };
        assert_eq!(unit.base_name(), "adguard");
    }

    #[test]
    fn uninterpreted_fields_survive_a_round_trip() {
        let raw = serde_json::json!({
            "ignition": {"version": "3.4.0"},
            "passwd": {"users": [{"name": "root"}]},
            "storage": {
                "files": [{
                    "path": "/etc/motd",
                    "mode": 420,
                    "user": {"name": "root"},
                    "contents": {"source": "data:,x", "compression": "null"}
                }]
            },
            "systemd": {
                "units": [{"name": "sshd.service", "enabled": true}]
            }
        });

        let doc: IgnitionDocument = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&doc).unwrap();

        assert_eq!(back["ignition"]["version"], "3.4.0");
        assert_eq!(back["passwd"]["users"][0]["name"], "root");
        assert_eq!(back["storage"]["files"][0]["user"]["name"], "root");
        assert_eq!(
            back["storage"]["files"][0]["contents"]["compression"],
            "null"
        );
        assert_eq!(back["systemd"]["units"][0]["enabled"], true);
    }
}
