pub mod posts;
pub mod tags;
pub mod users;

#[cfg(test)]
pub mod memory;


use diesel_async::AsyncPgConnection;

pub use posts::PostService;
pub use tags::TagService;
pub use users::UserService;

pub type Pool = diesel_async::pooled_connection::deadpool::Pool<AsyncPgConnection>;

/// Bounds every service needs to live in router state.
pub trait Svc: Clone + Send + Sync + 'static {}

/// Everything the full router needs.
pub trait BloglyService: UserService + PostService + TagService {}

impl<T> BloglyService for T where T: UserService + PostService + TagService {}

/// Services backed by the Postgres pool.
#[derive(Clone)]
pub struct BloglyDb {
    db: Pool,
}

impl Svc for BloglyDb {}

impl BloglyDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}
