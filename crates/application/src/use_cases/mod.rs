pub mod hosts;

pub use hosts::{AddHostUseCase, DeleteHostUseCase};
