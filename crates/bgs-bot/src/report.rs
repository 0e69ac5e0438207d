//! Report aggregation pipeline behind `systemstatus get`.
//!
//! One system lookup fans out into one faction lookup per minor faction
//! present, joined by an all-or-fail-fast barrier, then sorted per the
//! guild's preference and emitted as paginated embeds.

#[path = "report_tests.rs"]
mod report_tests;

use anyhow::Result;
use bgs_types::{paginate, time, EmbedField, FieldRecord, GuildConfig, SortField, ResponseKind, EMBED_COLOR};
use chrono::Utc;
use elitebgs_client::{EbgsApi, EbgsFaction, EbgsSystem, StateTrend};
use futures::future::try_join_all;
use tracing::{error, info, warn};

use crate::commands::CommandContext;
use crate::sink::ReplySink;
use crate::store::GuildStore;

/// Title of the first report page; later pages append a continuation marker.
const REPORT_TITLE: &str = "SYSTEM STATUS";

/// Run the full pipeline for one system and emit the result.
///
/// Transport failure on the system lookup is logged without a user-facing
/// message; transport failure anywhere in the faction fan-out aborts the
/// whole report with the generic failure response.
pub async fn system_status<S: GuildStore, A: EbgsApi>(
    ctx: &CommandContext<'_, S, A>,
    system_name: &str,
) -> Result<()> {
    let system = match ctx.api.fetch_system(system_name).await {
        Ok(Some(system)) => system,
        Ok(None) => {
            ctx.sink.send_text("System not found").await?;
            return Ok(());
        }
        Err(err) => {
            error!("system lookup failed for {:?}: {}", system_name, err);
            return Ok(());
        }
    };

    let mut records = match fetch_faction_records(ctx.api, &system).await {
        Ok(records) => records,
        Err(err) => {
            error!("faction fan-out failed for {:?}: {}", system.name, err);
            ctx.sink.send_text(ResponseKind::Fail.text()).await?;
            return Ok(());
        }
    };

    if let Some(guild_id) = ctx.invoker.guild_id {
        match ctx.store.get(guild_id).await {
            Ok(Some(config)) => sort_records(&mut records, &config),
            // A guild that never configured itself reads in fetch order.
            Ok(None) => {}
            Err(err) => {
                warn!("guild config lookup failed for {}: {}", guild_id, err);
                ctx.sink.send_text(ResponseKind::Fail.text()).await?;
                return Ok(());
            }
        }
    }

    let state = system.state.clone().unwrap_or_else(|| "None".to_string());
    let header = EmbedField::new(system.name.clone(), state);
    let pages = paginate(REPORT_TITLE, &header, &records, EMBED_COLOR, Utc::now());
    for page in &pages {
        // Pages go out strictly in order; a failed send does not abort the
        // remaining pages.
        if let Err(err) = ctx.sink.send_embed(page).await {
            warn!("failed to send report page {:?}: {}", page.title, err);
        }
    }
    info!(
        "system status report for {:?}: {} faction(s), {} page(s)",
        system.name,
        records.len(),
        pages.len()
    );
    Ok(())
}

/// Fan out one faction lookup per faction listed on the system record.
/// Lookup order is preserved; the first transport error fails the batch.
async fn fetch_faction_records<A: EbgsApi>(
    api: &A,
    system: &EbgsSystem,
) -> Result<Vec<FieldRecord>, A::Error> {
    try_join_all(system.factions.iter().map(|faction| async move {
        let record = match api.fetch_faction(&faction.name_lower).await? {
            Some(found) => build_field_record(&found, system),
            // Listed on the system record but gone from the faction
            // endpoint.
            None => FieldRecord {
                title: faction.name.clone(),
                body: "Faction status not found".to_string(),
                name: faction.name.clone(),
                influence: 0.0,
            },
        };
        Ok::<_, A::Error>(record)
    }))
    .await
}

/// Normalize one faction response into a rendering-ready record.
///
/// The `Last Updated` line reflects the *system* record's timestamp, not
/// the faction's own.
fn build_field_record(faction: &EbgsFaction, system: &EbgsSystem) -> FieldRecord {
    let Some(presence) = faction.presence_in(&system.name) else {
        return FieldRecord {
            title: faction.name.clone(),
            body: "Faction status not found".to_string(),
            name: faction.name.clone(),
            influence: 0.0,
        };
    };

    let mut body = String::new();
    body.push_str(&format!(
        "Last Updated : {}\n",
        time::relative_from_now(system.updated_at)
    ));
    body.push_str(&format!("State : {}\n", presence.state));
    body.push_str(&format!(
        "Influence : {:.1}%\n",
        presence.influence * 100.0
    ));
    body.push_str(&format!(
        "Pending States : {}\n",
        join_states(&presence.pending_states)
    ));
    body.push_str(&format!(
        "Recovering States : {}",
        join_states(&presence.recovering_states)
    ));

    let title = if faction.name_lower == system.controlling_minor_faction {
        format!("{}* CONTROLLING FACTION", faction.name)
    } else {
        faction.name.clone()
    };

    FieldRecord {
        title,
        body,
        name: faction.name.clone(),
        influence: presence.influence,
    }
}

fn join_states(states: &[StateTrend]) -> String {
    if states.is_empty() {
        return "None".to_string();
    }
    states
        .iter()
        .map(|entry| format!("{}{}", entry.state, trend_icon(entry.trend)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trend glyph: rising, falling, or steady. Total over all of `i32`.
fn trend_icon(trend: i32) -> &'static str {
    match trend {
        t if t > 0 => "⬆️",
        t if t < 0 => "⬇️",
        _ => "↔️",
    }
}

/// Stable sort per the guild's preference. An unset field or a zero
/// `sort_order` leaves fetch order untouched; equal keys keep their
/// relative order.
fn sort_records(records: &mut [FieldRecord], config: &GuildConfig) {
    let Some(field) = config.sort else {
        return;
    };
    let descending = match config.sort_order {
        1 => false,
        -1 => true,
        _ => return,
    };
    records.sort_by(|a, b| {
        let ordering = match field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Influence => a
                .influence
                .partial_cmp(&b.influence)
                .unwrap_or(std::cmp::Ordering::Equal),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}
