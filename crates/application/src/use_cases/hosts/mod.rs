mod add_host;
mod delete_host;

pub use add_host::AddHostUseCase;
pub use delete_host::DeleteHostUseCase;
