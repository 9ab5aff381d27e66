pub mod io;
pub mod schema;
pub mod validation;

pub use io::{config_dir, config_file_path, load_config};
pub use schema::TallyForgeConfig;
pub use validation::{validate, ValidationReport};
