//! @acp:module "Model"
//! @acp:summary "Figure catalog, rotation and the renderer port"
//! @acp:domain widget
//! @acp:layer feature

pub mod catalog;
pub mod rotation;

pub use catalog::{ModelCatalog, ModelGroup};
pub use rotation::{ModelRotation, ModelSelection};

/// File name the renderer saves screenshots under
pub const SCREENSHOT_NAME: &str = "photo.png";

/// The engine that draws the figure
pub trait FigureRenderer: Send + Sync {
    /// Load the model description at `url`
    fn load_model(&self, url: &str);

    /// Capture the next frame to `name`
    fn capture(&self, name: &str);

    fn set_visible(&self, visible: bool);
}

/// Model description path for an identifier, relative to the cdn root
pub fn model_resource_path(cdn_path: &str, identifier: &str) -> String {
    format!("{}model/{}/index.json", cdn_path, identifier)
}
