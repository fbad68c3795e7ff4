use clap::Parser;
use roster_common::params;
use roster_db::{models::DbUser, storage::UserStore};

#[derive(Clone, Parser)]
pub struct CreateUserParams {
    #[clap(short, long)]
    pub name: String,

    #[clap(short, long)]
    pub email: String,

    #[clap(short, long)]
    pub description: Option<String>,

    #[clap(short, long)]
    pub password: String,
}

pub async fn create_user(
    stg: &impl UserStore,
    CreateUserParams {
        name,
        email,
        description,
        password,
    }: CreateUserParams,
) -> anyhow::Result<DbUser> {
    let params = params::CreateUserParams {
        name,
        email,
        description,
        password,
    };
    params.validate()?;

    Ok(UserStore::create(stg, params).await?)
}
