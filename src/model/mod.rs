mod autogen;
mod io;
mod relations;

pub use autogen::{AutogenSettings, generate_network};
pub use io::{load_from_path, save_to_path};
pub use relations::{Direction, RelationModel};
