pub mod commit;
pub mod diff;
pub mod repo;
pub mod stage;
pub mod status;
pub mod sync;

pub use commit::*;
pub use diff::*;
pub use repo::*;
pub use stage::*;
pub use status::*;
pub use sync::*;
