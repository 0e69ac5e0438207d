#[cfg(test)]
mod tests {
    use bgs_types::{FieldRecord, GuildConfig, ResponseKind, SortField};
    use chrono::{Duration, Utc};
    use elitebgs_client::{
        EbgsFaction, EbgsSystem, FactionPresence, MockApi, StateTrend, SystemFactionRef,
    };

    use super::super::*;
    use crate::commands::{CommandContext, Invoker};
    use crate::sink::MockSink;
    use crate::store::{GuildStore, MemoryGuildStore};

    const GUILD: u64 = 100;

    fn system(name: &str, controlling: &str, faction_names: &[&str]) -> EbgsSystem {
        EbgsSystem {
            name: name.to_string(),
            state: Some("Boom".to_string()),
            controlling_minor_faction: controlling.to_lowercase(),
            factions: faction_names
                .iter()
                .map(|f| SystemFactionRef {
                    name: f.to_string(),
                    name_lower: f.to_lowercase(),
                })
                .collect(),
            updated_at: Utc::now() - Duration::hours(2),
        }
    }

    fn faction(name: &str, system_name: &str, influence: f64) -> EbgsFaction {
        EbgsFaction {
            name: name.to_string(),
            name_lower: name.to_lowercase(),
            faction_presence: vec![FactionPresence {
                system_name_lower: system_name.to_lowercase(),
                state: "Boom".to_string(),
                influence,
                pending_states: Vec::new(),
                recovering_states: Vec::new(),
            }],
        }
    }

    fn context<'a>(
        store: &'a MemoryGuildStore,
        api: &'a MockApi,
        sink: &'a MockSink,
    ) -> CommandContext<'a, MemoryGuildStore, MockApi> {
        CommandContext {
            invoker: Invoker {
                user_id: 1,
                guild_id: Some(GUILD),
                roles: Vec::new(),
                guild_roles: Vec::new(),
            },
            store,
            api,
            sink,
        }
    }

    // ── pipeline ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unknown_system_sends_single_message_and_no_fanout() {
        let store = MemoryGuildStore::new();
        let api = MockApi::new();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Nowhere")
            .await
            .unwrap();

        assert_eq!(sink.texts(), vec!["System not found"]);
        assert!(sink.pages().is_empty());
        assert!(api.faction_lookups().is_empty());
    }

    #[tokio::test]
    async fn test_system_transport_error_is_silent() {
        let store = MemoryGuildStore::new();
        let api = MockApi::new().failing("lave");
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_one_failed_faction_fails_the_whole_report() {
        let names = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];
        let mut api = MockApi::new().with_system(system("Lave", "alpha", &names));
        for name in names {
            api = api.with_faction(faction(name, "Lave", 0.2));
        }
        let api = api.failing("gamma");
        let store = MemoryGuildStore::new();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        assert_eq!(sink.texts(), vec![ResponseKind::Fail.text()]);
        assert!(sink.pages().is_empty());
    }

    #[tokio::test]
    async fn test_missing_faction_substitutes_not_found_record() {
        let api = MockApi::new()
            .with_system(system("Lave", "alpha", &["Alpha", "Ghost"]))
            .with_faction(faction("Alpha", "Lave", 0.6));
        let store = MemoryGuildStore::new();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        let pages = sink.pages();
        assert_eq!(pages.len(), 1);
        let ghost = &pages[0].fields[2];
        assert_eq!(ghost.name, "Ghost");
        assert_eq!(ghost.value, "Faction status not found");
    }

    #[tokio::test]
    async fn test_report_page_layout() {
        let api = MockApi::new()
            .with_system(system("Lave", "alpha", &["Alpha", "Beta"]))
            .with_faction(faction("Alpha", "Lave", 0.6))
            .with_faction(faction("Beta", "Lave", 0.3));
        let store = MemoryGuildStore::new();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        let pages = sink.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "SYSTEM STATUS");
        // header + 2 faction fields
        assert_eq!(pages[0].fields.len(), 3);
        assert_eq!(pages[0].fields[0].name, "Lave");
        assert_eq!(pages[0].fields[0].value, "Boom");
        assert_eq!(pages[0].fields[1].name, "Alpha* CONTROLLING FACTION");
        assert_eq!(pages[0].fields[2].name, "Beta");
    }

    #[tokio::test]
    async fn test_null_system_state_renders_as_none() {
        let mut sys = system("Lave", "alpha", &["Alpha"]);
        sys.state = None;
        let api = MockApi::new()
            .with_system(sys)
            .with_faction(faction("Alpha", "Lave", 0.6));
        let store = MemoryGuildStore::new();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        assert_eq!(sink.pages()[0].fields[0].value, "None");
    }

    #[tokio::test]
    async fn test_failed_page_send_does_not_abort_later_pages() {
        let names: Vec<String> = (0..30).map(|i| format!("Faction{:02}", i)).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut api = MockApi::new().with_system(system("Lave", "faction00", &name_refs));
        for name in &names {
            api = api.with_faction(faction(name, "Lave", 0.1));
        }
        let store = MemoryGuildStore::new();
        let sink = MockSink::new();
        sink.fail_embed(0);

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        // Page 0 was dropped by the transport; page 1 still went out.
        let pages = sink.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "SYSTEM STATUS - continued - Pg 2");
    }

    #[tokio::test]
    async fn test_guild_sort_preference_is_applied() {
        let api = MockApi::new()
            .with_system(system("Lave", "alpha", &["Beta", "Alpha"]))
            .with_faction(faction("Alpha", "Lave", 0.6))
            .with_faction(faction("Beta", "Lave", 0.3));
        let store = MemoryGuildStore::new();
        let mut config = GuildConfig::new(GUILD);
        config.sort = Some(SortField::Name);
        config.sort_order = 1;
        store.insert(config).await.unwrap();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        let fields = &sink.pages()[0].fields;
        assert_eq!(fields[1].name, "Alpha* CONTROLLING FACTION");
        assert_eq!(fields[2].name, "Beta");
    }

    #[tokio::test]
    async fn test_fetch_order_preserved_without_preference() {
        let api = MockApi::new()
            .with_system(system("Lave", "alpha", &["Beta", "Alpha"]))
            .with_faction(faction("Alpha", "Lave", 0.6))
            .with_faction(faction("Beta", "Lave", 0.3));
        let store = MemoryGuildStore::new();
        let sink = MockSink::new();

        system_status(&context(&store, &api, &sink), "Lave")
            .await
            .unwrap();

        let fields = &sink.pages()[0].fields;
        assert_eq!(fields[1].name, "Beta");
        assert_eq!(fields[2].name, "Alpha* CONTROLLING FACTION");
        assert_eq!(api.faction_lookups(), vec!["beta", "alpha"]);
    }

    // ── field records ─────────────────────────────────────────────────────────

    #[test]
    fn test_body_renders_empty_state_lists_as_none() {
        let sys = system("Lave", "alpha", &["Alpha"]);
        let record = build_field_record(&faction("Alpha", "Lave", 0.456), &sys);
        assert!(record.body.contains("Pending States : None"));
        assert!(record.body.contains("Recovering States : None"));
        assert!(record.body.contains("Influence : 45.6%"));
        assert!(record.body.contains("Last Updated : 2 hours ago"));
    }

    #[test]
    fn test_body_renders_states_with_trend_icons() {
        let sys = system("Lave", "alpha", &["Alpha"]);
        let mut alpha = faction("Alpha", "Lave", 0.5);
        alpha.faction_presence[0].pending_states = vec![
            StateTrend {
                state: "Expansion".to_string(),
                trend: 1,
            },
            StateTrend {
                state: "Famine".to_string(),
                trend: -1,
            },
        ];
        alpha.faction_presence[0].recovering_states = vec![StateTrend {
            state: "War".to_string(),
            trend: 0,
        }];
        let record = build_field_record(&alpha, &sys);
        assert!(record.body.contains("Pending States : Expansion⬆️, Famine⬇️"));
        assert!(record.body.contains("Recovering States : War↔️"));
    }

    #[test]
    fn test_faction_without_presence_entry_is_not_found() {
        let sys = system("Lave", "alpha", &["Alpha"]);
        let record = build_field_record(&faction("Alpha", "Diso", 0.5), &sys);
        assert_eq!(record.body, "Faction status not found");
        assert_eq!(record.influence, 0.0);
    }

    #[test]
    fn test_trend_icon_is_total() {
        assert_eq!(trend_icon(i32::MAX), "⬆️");
        assert_eq!(trend_icon(1), "⬆️");
        assert_eq!(trend_icon(0), "↔️");
        assert_eq!(trend_icon(-1), "⬇️");
        assert_eq!(trend_icon(i32::MIN), "⬇️");
    }

    // ── sorting ───────────────────────────────────────────────────────────────

    fn record(name: &str, influence: f64) -> FieldRecord {
        FieldRecord {
            title: name.to_string(),
            body: String::new(),
            name: name.to_string(),
            influence,
        }
    }

    fn preference(field: SortField, order: i8) -> GuildConfig {
        let mut config = GuildConfig::new(GUILD);
        config.sort = Some(field);
        config.sort_order = order;
        config
    }

    #[test]
    fn test_sort_influence_descending_is_stable() {
        let mut records = vec![record("A", 0.3), record("B", 0.9), record("C", 0.9)];
        sort_records(&mut records, &preference(SortField::Influence, -1));
        // B and C tie; their relative order is preserved.
        assert_eq!(records[0].name, "B");
        assert_eq!(records[1].name, "C");
        assert_eq!(records[2].name, "A");
    }

    #[test]
    fn test_sort_name_is_case_folded() {
        let mut records = vec![record("beta", 0.1), record("Alpha", 0.2)];
        sort_records(&mut records, &preference(SortField::Name, 1));
        assert_eq!(records[0].name, "Alpha");
        sort_records(&mut records, &preference(SortField::Name, -1));
        assert_eq!(records[0].name, "beta");
    }

    #[test]
    fn test_zero_sort_order_keeps_fetch_order() {
        let mut records = vec![record("B", 0.9), record("A", 0.3)];
        sort_records(&mut records, &preference(SortField::Name, 0));
        assert_eq!(records[0].name, "B");
    }
}
