mod create_user;
mod issue_token;

pub use create_user::*;
pub use issue_token::*;
