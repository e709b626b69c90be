mod activity_store;
mod generative_backend;
mod key_value_store;

pub use activity_store::ActivityStore;
pub use generative_backend::{
    BackendError, GenerationRequest, GenerationResponse, GenerativeBackend, Modality,
};
pub use key_value_store::KeyValueStore;
