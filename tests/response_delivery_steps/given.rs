//! Given steps for response delivery BDD scenarios.

use std::sync::Arc;

use super::world::DeliveryWorld;
use chatrelay::delivery::{
    adapters::memory::InMemoryArtifactStore,
    domain::{DeliveryConfig, FailurePolicy},
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given("a Discord delivery service without pacing")]
fn discord_service_without_pacing(world: &mut DeliveryWorld) {
    world.config = DeliveryConfig::discord().with_inter_message_delay_ms(0);
}

#[given("a Discord delivery service that continues on failure")]
fn discord_service_continuing(world: &mut DeliveryWorld) {
    world.config = DeliveryConfig::discord()
        .with_inter_message_delay_ms(0)
        .with_failure_policy(FailurePolicy::ContinueOnFailure);
}

#[given("an artifact store with a grace period of {grace_ms:u64} ms")]
fn artifact_store_with_grace(world: &mut DeliveryWorld, grace_ms: u64) {
    world.config = world.config.clone().with_artifact_grace_period_ms(grace_ms);
    world.store = Some(Arc::new(InMemoryArtifactStore::new(Arc::new(DefaultClock))));
}

#[given("an artifact store that is unavailable")]
fn unavailable_artifact_store(world: &mut DeliveryWorld) -> Result<(), eyre::Report> {
    let store = InMemoryArtifactStore::new(Arc::new(DefaultClock));
    store
        .set_unavailable("storage offline")
        .wrap_err("mark artifact store unavailable")?;
    world.store = Some(Arc::new(store));
    Ok(())
}

#[given("the transport rejects send number {number:usize}")]
fn transport_rejects_send(world: &mut DeliveryWorld, number: usize) -> Result<(), eyre::Report> {
    let call = number
        .checked_sub(1)
        .ok_or_else(|| eyre::eyre!("send numbers start at 1"))?;
    world
        .transport
        .fail_send(call)
        .wrap_err("configure failing send")?;
    Ok(())
}
