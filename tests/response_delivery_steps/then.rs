//! Then steps for response delivery BDD scenarios.

use super::world::{DeliveryWorld, run_async};
use chatrelay::delivery::{
    adapters::memory::SentMessage,
    services::{ATTACHMENT_PLACEHOLDER, DeliveryError},
};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;

fn sent_messages(world: &DeliveryWorld) -> Result<Vec<SentMessage>, eyre::Report> {
    world
        .transport
        .sent()
        .wrap_err("read recorded messages")
}

fn message(world: &DeliveryWorld, number: usize) -> Result<SentMessage, eyre::Report> {
    let sent = sent_messages(world)?;
    number
        .checked_sub(1)
        .and_then(|index| sent.get(index).cloned())
        .ok_or_else(|| eyre!("no message {number}; {} were sent", sent.len()))
}

fn delivery_error(world: &DeliveryWorld) -> Result<&DeliveryError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(report)) => Err(eyre!(
            "expected delivery to fail, but {} units were sent",
            report.units_sent
        )),
        None => Err(eyre!("no delivery was attempted")),
    }
}

fn expect_sent_count(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(_)) => {}
        Some(Err(err)) => return Err(eyre!("delivery failed: {err}")),
        None => return Err(eyre!("no delivery was attempted")),
    }
    let sent = sent_messages(world)?;
    if sent.len() != count {
        return Err(eyre!("expected {count} messages, found {}", sent.len()));
    }
    Ok(())
}

#[then("{count:usize} message is sent")]
fn one_message_sent(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    expect_sent_count(world, count)
}

#[then("{count:usize} messages are sent")]
fn messages_sent(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    expect_sent_count(world, count)
}

#[then(r#"message {number:usize} reads "{expected}""#)]
fn message_reads(
    world: &DeliveryWorld,
    number: usize,
    expected: String,
) -> Result<(), eyre::Report> {
    let found = message(world, number)?;
    if found.content != expected {
        return Err(eyre!("message {number} was {:?}", found.content));
    }
    Ok(())
}

#[then(r#"message {number:usize} is the attachment placeholder for "{language}""#)]
fn message_is_placeholder(
    world: &DeliveryWorld,
    number: usize,
    language: String,
) -> Result<(), eyre::Report> {
    let found = message(world, number)?;
    let expected = format!("```{language}\n{ATTACHMENT_PLACEHOLDER}\n```");
    if found.content != expected {
        return Err(eyre!("message {number} was {:?}", found.content));
    }
    Ok(())
}

#[then("message {number:usize} carries {count:usize} attachment")]
fn message_carries_attachments(
    world: &DeliveryWorld,
    number: usize,
    count: usize,
) -> Result<(), eyre::Report> {
    let found = message(world, number)?;
    if found.attachments.len() != count {
        return Err(eyre!(
            "message {number} carried {} attachments",
            found.attachments.len()
        ));
    }
    Ok(())
}

#[then("a typing indicator precedes every message")]
fn typing_precedes_messages(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let typing = world
        .transport
        .typing_count()
        .wrap_err("read typing count")?;
    let sent = sent_messages(world)?.len();
    if typing != sent {
        return Err(eyre!("{typing} typing indicators for {sent} messages"));
    }
    Ok(())
}

#[then("the artifact is removed after the grace period")]
fn artifact_removed(world: &mut DeliveryWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_result
        .take()
        .ok_or_else(|| eyre!("no delivery was attempted"))?
        .map_err(|err| eyre!("delivery failed: {err}"))?;
    if report.artifacts_created.len() != 1 {
        return Err(eyre!(
            "expected one artifact, found {}",
            report.artifacts_created.len()
        ));
    }
    run_async(report.wait_for_cleanup());

    let store = world
        .store
        .as_ref()
        .ok_or_else(|| eyre!("scenario has no artifact store"))?;
    let remaining = store.stored_count().wrap_err("count stored artifacts")?;
    if remaining != 0 {
        return Err(eyre!("{remaining} artifacts were not removed"));
    }
    let reports = world.observer.reports();
    if !reports.is_empty() {
        return Err(eyre!("unexpected cleanup failures: {reports:?}"));
    }
    Ok(())
}

#[then("every message fits within {limit:usize} characters")]
fn messages_fit(world: &DeliveryWorld, limit: usize) -> Result<(), eyre::Report> {
    for (index, sent) in sent_messages(world)?.iter().enumerate() {
        let length = sent.content.chars().count();
        if length > limit {
            return Err(eyre!("message {} has {length} characters", index + 1));
        }
    }
    Ok(())
}

#[then(r#"every message is a fenced "{language}" code chunk"#)]
fn messages_are_chunks(world: &DeliveryWorld, language: String) -> Result<(), eyre::Report> {
    let opening = format!("```{language}\n");
    let sent = sent_messages(world)?;
    if sent.len() < 2 {
        return Err(eyre!("expected several chunks, found {}", sent.len()));
    }
    for chunk in &sent {
        if !chunk.content.starts_with(&opening) || !chunk.content.ends_with("\n```") {
            return Err(eyre!("chunk is not fenced: {:?}", chunk.content));
        }
        if !chunk.attachments.is_empty() {
            return Err(eyre!("chunk unexpectedly carries attachments"));
        }
    }
    Ok(())
}

#[then("the chunk bodies rebuild the original code")]
fn chunks_rebuild_code(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let original = world
        .original_code
        .as_deref()
        .ok_or_else(|| eyre!("scenario did not record the original code"))?;
    let mut bodies = Vec::new();
    for chunk in sent_messages(world)? {
        let body = chunk
            .content
            .split_once('\n')
            .and_then(|(_, rest)| rest.strip_suffix("\n```"))
            .ok_or_else(|| eyre!("chunk is not fenced: {:?}", chunk.content))?
            .to_owned();
        bodies.push(body);
    }
    if bodies.join("\n") != original {
        return Err(eyre!("rebuilt code differs from the original"));
    }
    Ok(())
}

#[then("no word is cut across messages")]
fn no_word_cut(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    for sent in sent_messages(world)? {
        if sent.content.split(' ').any(|word| word != "lorem") {
            return Err(eyre!("a word was cut in {:?}", sent.content));
        }
    }
    Ok(())
}

#[then("delivery fails while sending message {number:usize}")]
fn delivery_fails_at(world: &DeliveryWorld, number: usize) -> Result<(), eyre::Report> {
    let err = delivery_error(world)?;
    match err {
        DeliveryError::Send { unit_index, .. } if *unit_index + 1 == number => Ok(()),
        other => Err(eyre!("unexpected delivery error: {other}")),
    }
}

#[then("delivery is incomplete with {delivered:usize} of {total:usize} messages delivered")]
fn delivery_incomplete(
    world: &DeliveryWorld,
    delivered: usize,
    total: usize,
) -> Result<(), eyre::Report> {
    let err = delivery_error(world)?;
    match err {
        DeliveryError::Incomplete {
            delivered: actual_delivered,
            total: actual_total,
            ..
        } if *actual_delivered == delivered && *actual_total == total => Ok(()),
        other => Err(eyre!("unexpected delivery error: {other}")),
    }
}

#[then("{count:usize} send attempts were made")]
fn send_attempts(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    let attempts = sent_messages(world)?.len();
    if attempts != count {
        return Err(eyre!("expected {count} send attempts, found {attempts}"));
    }
    Ok(())
}
