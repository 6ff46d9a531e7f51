mod assets_model_builder;

pub use assets_model_builder::AssetsModelBuilder;
