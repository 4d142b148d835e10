//! In-memory [`ProductApi`] for controller tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Mutex;

use product_dashboard_core::{Product, ProductFields, ProductId, UserId};
use reqwest::StatusCode;
use secrecy::ExposeSecret;

use super::{ApiError, Credentials, ProductApi};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    List(UserId),
    Create(UserId, ProductFields),
    Update(ProductId, ProductFields),
    Delete(ProductId),
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    next_id: i64,
    calls: Vec<Call>,
    failing: HashSet<Endpoint>,
    malformed_list: bool,
}

/// Backend double that behaves like a consistent server.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    /// Logged out while a list request is in flight.
    logout_during_list: Option<SessionStore>,
}

impl FakeApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            state.next_id = 100;
            state.products = products;
        }
        api
    }

    pub fn logging_out_during_list(mut self, session: SessionStore) -> Self {
        self.logout_during_list = Some(session);
        self
    }

    pub fn fail(&self, endpoint: Endpoint) {
        self.state.lock().unwrap().failing.insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.state.lock().unwrap().failing.remove(&endpoint);
    }

    pub fn set_malformed_list(&self, malformed: bool) {
        self.state.lock().unwrap().malformed_list = malformed;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                let kind = match call {
                    Call::Login(_) => Endpoint::Login,
                    Call::List(_) => Endpoint::List,
                    Call::Create(..) => Endpoint::Create,
                    Call::Update(..) => Endpoint::Update,
                    Call::Delete(_) => Endpoint::Delete,
                };
                kind == endpoint
            })
            .count()
    }

    pub fn stored(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    fn record(&self, call: Call, endpoint: Endpoint) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(&endpoint) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }
}

impl ProductApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<UserId, ApiError> {
        self.record(Call::Login(credentials.username.clone()), Endpoint::Login)?;
        if credentials.password.expose_secret() == "secret" {
            Ok(UserId::from(1))
        } else {
            Err(ApiError::InvalidCredentials)
        }
    }

    async fn list_products(&self, user_id: &UserId) -> Result<Vec<Product>, ApiError> {
        self.record(Call::List(user_id.clone()), Endpoint::List)?;
        if let Some(session) = &self.logout_during_list {
            session.logout().await;
        }
        let state = self.state.lock().unwrap();
        if state.malformed_list {
            return Ok(Vec::new());
        }
        Ok(state.products.clone())
    }

    async fn create_product(
        &self,
        user_id: &UserId,
        fields: &ProductFields,
    ) -> Result<ProductId, ApiError> {
        self.record(Call::Create(user_id.clone(), fields.clone()), Endpoint::Create)?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = ProductId::from(state.next_id);
        let mut product = Product::from_fields(id.clone(), fields);
        if fields.color.is_empty() {
            product.color = Some(super::DEFAULT_PRODUCT_COLOR.to_string());
        }
        state.products.push(product);
        Ok(id)
    }

    async fn update_product(&self, id: &ProductId, fields: &ProductFields) -> Result<(), ApiError> {
        self.record(Call::Update(id.clone(), fields.clone()), Endpoint::Update)?;
        let mut state = self.state.lock().unwrap();
        if let Some(product) = state.products.iter_mut().find(|p| &p.id == id) {
            *product = Product::from_fields(id.clone(), fields);
        }
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.record(Call::Delete(id.clone()), Endpoint::Delete)?;
        self.state.lock().unwrap().products.retain(|p| &p.id != id);
        Ok(())
    }
}
