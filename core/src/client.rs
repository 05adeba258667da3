//! One-stop client wiring every service over a shared transport and store.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::AuthService;
use crate::cars::CarService;
use crate::config::Environment;
use crate::history::HistoryService;
use crate::http::{Transport, UreqTransport};
use crate::register::RegisterService;
use crate::reservations::ReservationService;
use crate::session::SessionStore;
use crate::storage::Storage;
use crate::upload::ImageUploadService;
use crate::users::UserService;

/// The assembled SDK: one transport, one session store, one service per
/// backend resource.
pub struct CertiwebClient {
    pub auth: AuthService,
    pub cars: CarService,
    pub reservations: ReservationService,
    pub users: UserService,
    pub history: HistoryService,
    pub register: RegisterService,
    pub images: ImageUploadService,
    store: SessionStore,
}

impl CertiwebClient {
    /// Wires the services over the real ureq transport.
    pub fn new(env: &Environment, storage: Arc<dyn Storage>) -> Self {
        Self::with_transport(env, storage, Arc::new(UreqTransport::new()))
    }

    /// Same wiring with an injected transport.
    pub fn with_transport(
        env: &Environment,
        storage: Arc<dyn Storage>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let store = SessionStore::new(storage);
        let api = ApiClient::new(&env.server_base_path, transport.clone(), store.clone());
        Self {
            auth: AuthService::new(api.clone(), store.clone()),
            cars: CarService::new(api.clone()),
            reservations: ReservationService::new(api.clone()),
            users: UserService::new(api.clone(), store.clone()),
            history: HistoryService::new(api.clone()),
            register: RegisterService::new(api, store.clone()),
            images: ImageUploadService::new(env, transport),
            store,
        }
    }

    /// Direct access to the session store, mainly for embedders that render
    /// auth state.
    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }
}
