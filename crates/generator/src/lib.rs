//! Python client skeleton generation
//!
//! This crate renders a resolved `ApiDescription` into a Python package:
//! one module per model, one API class per tag, package `__init__` files,
//! optional unittest stubs and a README listing every model's CRUD bindings.
//! API methods only describe the request; there is no transport code.

mod templates;
mod views;

pub use templates::python_type;
pub use views::{ApiView, ModelView};

use kube_codegen_common::{ApiDescription, GeneratorConfig, GeneratorError, Result};
use kube_codegen_resolver::{naming, values};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::debug;

/// Client generator
///
/// Transforms a resolved ApiDescription into a client package:
/// - `<package>/__init__.py`
/// - `<package>/models/*.py`
/// - `<package>/apis/*.py`
/// - `test/test_*.py` (unless tests are excluded)
/// - `README.md`
pub struct ClientGenerator {
    description: ApiDescription,
    config: GeneratorConfig,
    package_name: String,
    tera: Tera,
}

impl ClientGenerator {
    /// Create a generator for a resolved description
    pub fn new(description: ApiDescription, config: GeneratorConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        let package_name = naming::generate_package_name(&config.package_name);
        if package_name.is_empty() {
            return Err(GeneratorError::Config(format!(
                "Package name '{}' has no identifier characters",
                config.package_name
            )));
        }

        Ok(Self {
            description,
            config,
            package_name,
            tera,
        })
    }

    /// Python package name, cleaned
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Generate all artifacts under `output_dir`; returns the written files
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let package_dir = output_dir.join(&self.package_name);
        let models_dir = package_dir.join("models");
        let apis_dir = package_dir.join("apis");

        for dir in [&models_dir, &apis_dir] {
            fs::create_dir_all(dir).map_err(|e| {
                GeneratorError::Generation(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let models: Vec<ModelView> = self
            .description
            .models
            .iter()
            .map(ModelView::from_model)
            .collect();
        let apis = views::api_views(
            &self.description,
            &self.package_name,
            self.config.sort_params_by_required,
        )?;

        let mut written = Vec::new();
        written.extend(self.generate_models(&models_dir, &models)?);
        written.extend(self.generate_apis(&apis_dir, &apis)?);
        written.extend(self.generate_package_inits(&package_dir, &models, &apis)?);

        if self.config.exclude_tests {
            debug!("Skipping test stubs");
        } else {
            let test_dir = output_dir.join("test");
            fs::create_dir_all(&test_dir).map_err(|e| {
                GeneratorError::Generation(format!("Failed to create test directory: {}", e))
            })?;
            written.extend(self.generate_tests(&test_dir, &models, &apis)?);
        }

        written.push(self.generate_readme(output_dir, &models, &apis)?);

        Ok(written)
    }

    /// Generate one module per model
    fn generate_models(&self, models_dir: &Path, models: &[ModelView]) -> Result<Vec<PathBuf>> {
        models
            .iter()
            .map(|model| {
                let mut context = self.create_context();
                context.insert("model", model);
                let path = models_dir.join(format!("{}.py", model.file_name));
                self.render_to_file("model.py", &context, path)
            })
            .collect()
    }

    /// Generate one module per API class
    fn generate_apis(&self, apis_dir: &Path, apis: &[ApiView]) -> Result<Vec<PathBuf>> {
        apis.iter()
            .map(|api| {
                let mut context = self.create_context();
                context.insert("api", api);
                let path = apis_dir.join(format!("{}.py", api.file_name));
                self.render_to_file("api.py", &context, path)
            })
            .collect()
    }

    /// Generate `__init__.py` for the package, models and apis
    fn generate_package_inits(
        &self,
        package_dir: &Path,
        models: &[ModelView],
        apis: &[ApiView],
    ) -> Result<Vec<PathBuf>> {
        let mut context = self.create_context();
        context.insert("models", models);
        context.insert("apis", apis);

        Ok(vec![
            self.render_to_file("package_init.py", &context, package_dir.join("__init__.py"))?,
            self.render_to_file(
                "models_init.py",
                &context,
                package_dir.join("models").join("__init__.py"),
            )?,
            self.render_to_file(
                "apis_init.py",
                &context,
                package_dir.join("apis").join("__init__.py"),
            )?,
        ])
    }

    /// Generate unittest stubs
    fn generate_tests(
        &self,
        test_dir: &Path,
        models: &[ModelView],
        apis: &[ApiView],
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for model in models {
            let mut context = self.create_context();
            context.insert("model", model);
            let path = test_dir.join(format!("{}.py", model.test_file_name));
            written.push(self.render_to_file("model_test.py", &context, path)?);
        }

        for api in apis {
            let mut context = self.create_context();
            context.insert("api", api);
            let path = test_dir.join(format!("{}.py", api.test_file_name));
            written.push(self.render_to_file("api_test.py", &context, path)?);
        }

        Ok(written)
    }

    /// Generate README.md
    fn generate_readme(
        &self,
        output_dir: &Path,
        models: &[ModelView],
        apis: &[ApiView],
    ) -> Result<PathBuf> {
        let mut context = self.create_context();
        context.insert("models", models);
        context.insert("apis", apis);
        self.render_to_file("README.md", &context, output_dir.join("README.md"))
    }

    fn render_to_file(
        &self,
        template: &str,
        context: &tera::Context,
        path: PathBuf,
    ) -> Result<PathBuf> {
        let rendered = self
            .tera
            .render(template, context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))?;

        fs::write(&path, rendered).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Context shared by every template
    fn create_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("title", &values::escape_text(&self.description.title));
        context.insert("version", &values::escape_text(&self.description.version));
        context.insert("package_name", &self.package_name);
        context.insert(
            "package_version",
            &naming::escape_quotation_mark(&self.config.package_version),
        );
        context
    }
}

/// Generate a client package (convenience function)
pub fn generate_client(
    description: ApiDescription,
    config: GeneratorConfig,
    output_path: &Path,
) -> Result<Vec<PathBuf>> {
    let generator = ClientGenerator::new(description, config)?;
    generator.generate_to_directory(output_path)
}
