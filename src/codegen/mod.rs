//! Code Generation
//!
//! Renders a [`UdsModel`] through tera templates.
//!
//! Two modes:
//! - Fixed: the built-in C++ template pair produces `uds_def.h` and
//!   `uds_def.cpp` in one output directory.
//! - Parametric: one caller-supplied template produces one file, named after
//!   the template with its `.template` suffix removed.
//!
//! Templates never see the model directly, only a [`RenderContext`].

pub mod context;
pub mod filters;

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use tera::Tera;
use tracing::info;

use crate::error::{GenError, ResourceKind, Result};
use crate::model::UdsModel;

pub use context::RenderContext;
pub use filters::{lower_snake, register_filters, upper_snake};

static EMBEDDED_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Suffix that marks a file as a template
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Declarations template of the fixed pair
pub const HEADER_TEMPLATE: &str = "cpp/uds_def.h.template";

/// Definitions template of the fixed pair
pub const SOURCE_TEMPLATE: &str = "cpp/uds_def.cpp.template";

/// Where the fixed template pair is read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary
    #[default]
    Embedded,
    /// A directory laid out like the built-in `templates/` directory
    Directory(PathBuf),
}

/// Tera instance with the text-transform filters registered
pub struct Generator {
    tera: Tera,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);
        Self { tera }
    }

    /// Add a template from a file on disk under `name`
    pub fn add_template_file(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GenError::MissingResource {
                kind: ResourceKind::Template,
                path: path.to_path_buf(),
            });
        }
        self.tera.add_template_file(path, Some(name))?;
        Ok(())
    }

    /// Add a template from memory
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Add one of the fixed templates from `source`
    pub fn add_fixed_template(&mut self, name: &str, source: &TemplateSource) -> Result<()> {
        match source {
            TemplateSource::Embedded => {
                let content = EMBEDDED_TEMPLATES
                    .get_file(name)
                    .and_then(|f| f.contents_utf8())
                    .ok_or_else(|| GenError::MissingResource {
                        kind: ResourceKind::Template,
                        path: PathBuf::from("<embedded>").join(name),
                    })?;
                self.add_raw_template(name, content)
            }
            TemplateSource::Directory(dir) => self.add_template_file(name, dir.join(name)),
        }
    }

    /// Render a registered template
    pub fn render(&self, name: &str, model: &UdsModel) -> Result<String> {
        let context = RenderContext::from_model(model)?.to_tera()?;
        Ok(self.tera.render(name, &context)?)
    }
}

/// Output file name for a template path: the file name minus `suffix`
pub fn output_file_name(template: &Path, suffix: &str) -> Result<String> {
    let name_error = || GenError::TemplateName {
        path: template.to_path_buf(),
        suffix: suffix.to_string(),
    };

    let file_name = template
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(name_error)?;

    match file_name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
        _ => Err(name_error()),
    }
}

/// Render the fixed header/implementation pair into `out_dir`
///
/// `out_dir` is created if it does not exist. Existing files are overwritten.
pub fn generate_fixed(model: &UdsModel, templates: &TemplateSource, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut generator = Generator::new();
    let mut written = Vec::new();

    for name in [HEADER_TEMPLATE, SOURCE_TEMPLATE] {
        generator.add_fixed_template(name, templates)?;
        let rendered = generator.render(name, model)?;

        let output = out_dir.join(output_file_name(Path::new(name), TEMPLATE_SUFFIX)?);
        fs::write(&output, rendered)?;
        info!(template = name, output = %output.display(), "generated");
        written.push(output);
    }

    Ok(written)
}

/// Render one template file into `out_dir`, which must already exist
pub fn generate_from_template(model: &UdsModel, template: &Path, out_dir: &Path, suffix: &str) -> Result<PathBuf> {
    if !out_dir.is_dir() {
        return Err(GenError::MissingResource {
            kind: ResourceKind::OutputDir,
            path: out_dir.to_path_buf(),
        });
    }

    let file_name = output_file_name(template, suffix)?;
    let name = template.to_string_lossy().into_owned();

    let mut generator = Generator::new();
    generator.add_template_file(&name, template)?;
    let rendered = generator.render(&name, model)?;

    let output = out_dir.join(file_name);
    fs::write(&output, rendered)?;
    info!(template = %template.display(), output = %output.display(), "generated");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(Path::new("templates/cpp/uds_def.h.template"), TEMPLATE_SUFFIX).unwrap(),
            "uds_def.h"
        );
        assert_eq!(output_file_name(Path::new("x.rs.tpl"), ".tpl").unwrap(), "x.rs");
    }

    #[test]
    fn test_output_file_name_requires_suffix() {
        assert!(matches!(
            output_file_name(Path::new("uds_def.h"), TEMPLATE_SUFFIX),
            Err(GenError::TemplateName { .. })
        ));
        assert!(output_file_name(Path::new(".template"), TEMPLATE_SUFFIX).is_err());
    }

    #[test]
    fn test_embedded_templates_present() {
        let mut generator = Generator::new();
        generator.add_fixed_template(HEADER_TEMPLATE, &TemplateSource::Embedded).unwrap();
        generator.add_fixed_template(SOURCE_TEMPLATE, &TemplateSource::Embedded).unwrap();
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let dir = tempdir().unwrap();
        let result = generate_from_template(
            &UdsModel::default(),
            &dir.path().join("absent.h.template"),
            dir.path(),
            TEMPLATE_SUFFIX,
        );
        assert!(matches!(
            result,
            Err(GenError::MissingResource { kind: ResourceKind::Template, .. })
        ));
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("a.txt.template");
        fs::write(&template, "x").unwrap();
        let result = generate_from_template(&UdsModel::default(), &template, &dir.path().join("nope"), TEMPLATE_SUFFIX);
        assert!(matches!(
            result,
            Err(GenError::MissingResource { kind: ResourceKind::OutputDir, .. })
        ));
    }

    #[test]
    fn test_unregistered_template_is_error() {
        let generator = Generator::new();
        assert!(matches!(
            generator.render("missing", &UdsModel::default()),
            Err(GenError::Template(_))
        ));
    }

    #[test]
    fn test_fixed_mode_creates_output_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("output");
        let written = generate_fixed(&UdsModel::default(), &TemplateSource::Embedded, &out).unwrap();
        assert_eq!(written, vec![out.join("uds_def.h"), out.join("uds_def.cpp")]);
        assert!(written.iter().all(|p| p.is_file()));
    }
}
