// Repository trait for persisted royalty data
use crate::domain::contract::{Contract, ContractInput};
use crate::domain::royalty::{Royalty, RoyaltyInput};
use crate::domain::user::User;
use async_trait::async_trait;

#[async_trait]
pub trait RoyaltyRepository: Send + Sync {
    /// Plain username/password equality lookup, as the schema stores it.
    async fn find_user(&self, username: &str, password: &str) -> anyhow::Result<Option<User>>;

    async fn list_royalties(&self) -> anyhow::Result<Vec<Royalty>>;
    async fn insert_royalty(&self, input: &RoyaltyInput) -> anyhow::Result<Royalty>;
    async fn update_royalty(&self, id: i64, input: &RoyaltyInput)
        -> anyhow::Result<Option<Royalty>>;
    async fn delete_royalty(&self, id: i64) -> anyhow::Result<bool>;

    async fn list_contracts(&self) -> anyhow::Result<Vec<Contract>>;
    async fn insert_contract(&self, input: &ContractInput) -> anyhow::Result<Contract>;
    async fn update_contract(
        &self,
        id: i64,
        input: &ContractInput,
    ) -> anyhow::Result<Option<Contract>>;
    async fn delete_contract(&self, id: i64) -> anyhow::Result<bool>;
}
