//! Role-based access checks for command verbs.

use tracing::warn;

use crate::commands::Invoker;
use crate::store::GuildStore;

/// Role category a verb may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCategory {
    /// Holder of one of the guild's admin roles.
    Admin,
    /// Holder of the guild's BGS operator role.
    Bgs,
    /// Holder of one of the guild's forbidden-override roles; grants
    /// unconditionally whenever this category is requested.
    Forbidden,
}

/// True when the invoker holds at least one of the required categories.
///
/// A guild with no stored configuration has no roles mapped, so everything
/// is denied. Store failures are logged and treated as denial, so callers
/// get a definite answer before any side effect happens.
pub async fn has_access<S: GuildStore>(
    store: &S,
    invoker: &Invoker,
    required: &[AccessCategory],
) -> bool {
    let Some(guild_id) = invoker.guild_id else {
        return false;
    };
    let config = match store.get(guild_id).await {
        Ok(Some(config)) => config,
        Ok(None) => return false,
        Err(err) => {
            warn!("guild config lookup failed for {}: {}", guild_id, err);
            return false;
        }
    };

    if required.contains(&AccessCategory::Forbidden)
        && invoker
            .roles
            .iter()
            .any(|role| config.forbidden_roles.contains(role))
    {
        return true;
    }

    required.iter().any(|category| match category {
        AccessCategory::Admin => invoker
            .roles
            .iter()
            .any(|role| config.admin_roles.contains(role)),
        AccessCategory::Bgs => config
            .bgs_role
            .is_some_and(|role| invoker.roles.contains(&role)),
        AccessCategory::Forbidden => false,
    })
}

#[cfg(test)]
mod tests {
    use bgs_types::GuildConfig;

    use super::*;
    use crate::store::MemoryGuildStore;

    const GUILD: u64 = 100;

    fn invoker(roles: &[u64]) -> Invoker {
        Invoker {
            user_id: 1,
            guild_id: Some(GUILD),
            roles: roles.to_vec(),
            guild_roles: Vec::new(),
        }
    }

    async fn store_with(config: GuildConfig) -> MemoryGuildStore {
        let store = MemoryGuildStore::new();
        store.insert(config).await.unwrap();
        store
    }

    fn config() -> GuildConfig {
        let mut config = GuildConfig::new(GUILD);
        config.admin_roles = vec![10, 11];
        config.bgs_role = Some(20);
        config.forbidden_roles = vec![30];
        config
    }

    #[tokio::test]
    async fn test_missing_guild_config_denies() {
        let store = MemoryGuildStore::new();
        let allowed = has_access(&store, &invoker(&[10]), &[AccessCategory::Admin]).await;
        assert!(!allowed);
    }

    #[tokio::test]
    async fn test_dm_invocation_denies() {
        let store = store_with(config()).await;
        let mut dm_invoker = invoker(&[10]);
        dm_invoker.guild_id = None;
        assert!(!has_access(&store, &dm_invoker, &[AccessCategory::Admin]).await);
    }

    #[tokio::test]
    async fn test_admin_role_grants() {
        let store = store_with(config()).await;
        assert!(has_access(&store, &invoker(&[11]), &[AccessCategory::Admin]).await);
    }

    #[tokio::test]
    async fn test_bgs_role_grants_bgs_category() {
        let store = store_with(config()).await;
        let required = [AccessCategory::Admin, AccessCategory::Bgs];
        assert!(has_access(&store, &invoker(&[20]), &required).await);
    }

    #[tokio::test]
    async fn test_forbidden_override_grants_without_other_roles() {
        let store = store_with(config()).await;
        let required = [
            AccessCategory::Admin,
            AccessCategory::Bgs,
            AccessCategory::Forbidden,
        ];
        assert!(has_access(&store, &invoker(&[30]), &required).await);
    }

    #[tokio::test]
    async fn test_forbidden_role_alone_does_not_grant_other_categories() {
        let store = store_with(config()).await;
        // Forbidden not among the required categories: the override role
        // carries no weight.
        assert!(!has_access(&store, &invoker(&[30]), &[AccessCategory::Admin]).await);
    }

    #[tokio::test]
    async fn test_unrelated_roles_deny() {
        let store = store_with(config()).await;
        let required = [
            AccessCategory::Admin,
            AccessCategory::Bgs,
            AccessCategory::Forbidden,
        ];
        assert!(!has_access(&store, &invoker(&[99]), &required).await);
    }
}
