use crate::domain::model::Story;
use crate::domain::ports::ViewRenderer;
use crate::utils::error::Result;
use minijinja::{context, path_loader, Environment};
use std::path::Path;

const BUILTIN_INDEX: &str = include_str!("../../templates/index.html");

/// Renders `<view>.html` templates with the fetched story as the only value.
pub struct MiniJinjaViews {
    env: Environment<'static>,
}

impl MiniJinjaViews {
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir.as_ref().to_path_buf()));
        tracing::debug!("🧩 Loading views from {}", dir.as_ref().display());
        Self { env }
    }

    pub fn builtin() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("index.html", BUILTIN_INDEX)?;
        Ok(Self { env })
    }
}

impl ViewRenderer for MiniJinjaViews {
    fn render(&self, view: &str, story: &Story) -> Result<String> {
        let template = self.env.get_template(&format!("{}.html", view))?;
        Ok(template.render(context! { story => story })?)
    }
}
