pub mod services;

pub use services::{
    ConnectionManager, FeedPaginator, LoadOutcome, WorldService, WorldServiceError,
};
