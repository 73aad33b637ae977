//! Forward-direction builders: the Ignition config and the Combustion
//! first-boot script.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::{ContentSource, IgnitionDocument};
use crate::embed::embed;
use crate::error::AppError;
use crate::template::TemplateEngine;
use crate::vars::VarMap;

/// On-disk layout the builders operate over, relative to one project root.
#[derive(Debug, Clone)]
pub struct BuildLayout {
    /// Asset tree mirroring target file paths minus the leading slash.
    pub files_dir: PathBuf,
    /// Overrides tree keyed by `<unit-base-name>.d/<dropin-name>`.
    pub systemd_dir: PathBuf,
    /// Structural template for the Ignition config.
    pub ignition_template: PathBuf,
    /// Flat template for the Combustion script.
    pub combustion_template: PathBuf,
    /// Build artifact root; outputs mirror the template paths beneath it.
    pub output_dir: PathBuf,
}

impl BuildLayout {
    /// The conventional layout rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            files_dir: root.join("files"),
            systemd_dir: root.join("systemd"),
            ignition_template: root.join("ignition").join("config.ign"),
            combustion_template: root.join("combustion").join("script"),
            output_dir: root.join("_build"),
        }
    }

    /// Output path for the built Ignition config.
    pub fn ignition_output(&self) -> PathBuf {
        self.output_dir.join("ignition").join("config.ign")
    }

    /// Output path for the built Combustion script.
    pub fn combustion_output(&self) -> PathBuf {
        self.output_dir.join("combustion").join("script")
    }
}

/// Read a backing asset, mapping a missing file to [`AppError::AssetNotFound`].
fn read_asset(path: &Path) -> Result<String, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AppError::AssetNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Builds the Ignition config from the structural template.
///
/// Four strictly ordered phases: render + parse, file materialization,
/// systemd override materialization, serialization. Phases 2 and 3 mutate
/// only the in-memory document; the artifact is written exactly once at the
/// end, so a failed build leaves no half-written output.
pub struct IgnitionBuilder<'a> {
    vars: &'a VarMap,
    layout: &'a BuildLayout,
    engine: TemplateEngine,
}

impl<'a> IgnitionBuilder<'a> {
    pub fn new(vars: &'a VarMap, layout: &'a BuildLayout) -> Self {
        Self {
            vars,
            layout,
            engine: TemplateEngine::new(),
        }
    }

    /// Run all phases in order and return the output path.
    pub fn build(&self) -> Result<PathBuf, AppError> {
        let mut doc = self.first_pass()?;
        self.materialize_files(&mut doc)?;
        self.materialize_dropins(&mut doc)?;
        self.write(&doc)
    }

    /// Phase 1: render the structural template and parse it into a typed
    /// document. Must fully succeed before any asset I/O happens.
    fn first_pass(&self) -> Result<IgnitionDocument, AppError> {
        let template_path = &self.layout.ignition_template;
        let name = template_path.display().to_string();
        let source = fs::read_to_string(template_path)?;
        let rendered = self.engine.render(&name, &source, self.vars)?;
        serde_json::from_str(&rendered)
            .map_err(|e| AppError::MalformedDocument { path: name, source: e })
    }

    /// Phase 2: resolve file entry contents and embed them in place.
    fn materialize_files(&self, doc: &mut IgnitionDocument) -> Result<(), AppError> {
        for file in &mut doc.storage.files {
            let content = match file.content_source() {
                ContentSource::External => {
                    let asset = self.layout.files_dir.join(file.path.trim_start_matches('/'));
                    read_asset(&asset)?
                }
                ContentSource::InlineTemplate => {
                    let source = file.source().unwrap_or("");
                    self.engine.render(&file.path, source, self.vars)?
                }
                ContentSource::Resolved => continue,
            };
            file.set_source(embed(&content));
        }
        Ok(())
    }

    /// Phase 3: fill empty dropin contents from the overrides tree. Dropin
    /// contents stay plaintext, unlike file entry contents.
    fn materialize_dropins(&self, doc: &mut IgnitionDocument) -> Result<(), AppError> {
        for unit in &mut doc.systemd.units {
            let overrides_dir = self.layout.systemd_dir.join(format!("{}.d", unit.base_name()));
            for dropin in &mut unit.dropins {
                if dropin.contents.is_empty() {
                    dropin.contents = read_asset(&overrides_dir.join(&dropin.name))?;
                }
            }
        }
        Ok(())
    }

    /// Phase 4: write the document once as 2-space-indented JSON.
    fn write(&self, doc: &IgnitionDocument) -> Result<PathBuf, AppError> {
        let output = self.layout.ignition_output();
        let json = serde_json::to_string_pretty(doc).map_err(|e| AppError::MalformedDocument {
            path: output.display().to_string(),
            source: e,
        })?;
        write_output(&output, &json)?;
        Ok(output)
    }
}

/// Builds the Combustion script: a single flat render, written verbatim.
pub struct CombustionBuilder<'a> {
    vars: &'a VarMap,
    layout: &'a BuildLayout,
    engine: TemplateEngine,
}

impl<'a> CombustionBuilder<'a> {
    pub fn new(vars: &'a VarMap, layout: &'a BuildLayout) -> Self {
        Self {
            vars,
            layout,
            engine: TemplateEngine::new(),
        }
    }

    pub fn build(&self) -> Result<PathBuf, AppError> {
        let template_path = &self.layout.combustion_template;
        let name = template_path.display().to_string();
        let source = fs::read_to_string(template_path)?;
        let rendered = self.engine.render(&name, &source, self.vars)?;

        let output = self.layout.combustion_output();
        write_output(&output, &rendered)?;
        Ok(output)
    }
}
