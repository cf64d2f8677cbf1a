//! Integration tests for tenant lifecycle, messages, settings, and audit.

mod common;

use chrono::{Days, NaiveDate};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use grantbook_core::audit::AuditAction;
use grantbook_core::fiscal::Month;
use grantbook_core::ledger::{AccessDenied, CreditLineItem, LedgerError, NewCredit};
use grantbook_core::settings::{DEFAULT_MINISTRY, Settings};
use grantbook_core::tenant::{MessageKind, NewTenant, SubscriptionStatus};
use grantbook_db::entities::{budget_lines, credits, settings, tenants};
use grantbook_db::{
    AuditLog, LedgerRepository, MessageRepository, SettingsRepository, TenantRepository,
};
use grantbook_shared::TenancyConfig;
use grantbook_shared::types::{MessageId, TenantId};

use common::{ctx, onboard, operator, setup, today};

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).expect("valid date")
}

fn tenants_repo(db: &sea_orm::DatabaseConnection) -> TenantRepository {
    TenantRepository::new(db.clone(), TenancyConfig::default())
}

#[tokio::test]
async fn test_onboarding_creates_trial_settings_and_budget() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);

    let tenant = repo
        .onboard(
            &operator(),
            &NewTenant {
                school_name: "  Chichiri Secondary  ".into(),
                username: "chichiri".into(),
            },
            today(),
        )
        .await
        .unwrap();

    assert_eq!(tenant.school_name, "Chichiri Secondary");
    assert_eq!(tenant.subscription_status, SubscriptionStatus::Trial);
    assert_eq!(tenant.subscription_start, Some(today()));
    assert_eq!(tenant.subscription_end, Some(days_after(today(), 30)));
    assert!(tenant.is_active);
    assert!(!tenant.is_locked);

    let lines = budget_lines::Entity::find()
        .filter(budget_lines::Column::TenantId.eq(tenant.id.into_inner()))
        .filter(budget_lines::Column::FinancialYear.eq("2026-2027"))
        .count(&test.db)
        .await
        .unwrap();
    assert_eq!(lines, 42);

    let saved = SettingsRepository::new(test.db.clone())
        .get_settings(&ctx(tenant.id, "2026-2027"))
        .await
        .unwrap();
    assert!(saved.is_persisted);
    assert_eq!(saved.school_name, "Chichiri Secondary");
    assert_eq!(saved.ministry_department, DEFAULT_MINISTRY);

    let found = repo.find_by_username("chichiri").await.unwrap().unwrap();
    assert_eq!(found.id, tenant.id);
}

#[tokio::test]
async fn test_duplicate_username_leaves_no_partial_rows() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    onboard(&test.db, "zingwangwa").await;

    let err = repo
        .onboard(
            &operator(),
            &NewTenant {
                school_name: "Another School".into(),
                username: "zingwangwa".into(),
            },
            today(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ConstraintViolation(_)));

    assert_eq!(tenants::Entity::find().count(&test.db).await.unwrap(), 1);
    assert_eq!(settings::Entity::find().count(&test.db).await.unwrap(), 1);
    assert_eq!(budget_lines::Entity::find().count(&test.db).await.unwrap(), 42);
}

#[tokio::test]
async fn test_blank_onboarding_input_is_malformed() {
    let test = setup().await;
    let err = tenants_repo(&test.db)
        .onboard(
            &operator(),
            &NewTenant {
                school_name: "Bangwe".into(),
                username: "   ".into(),
            },
            today(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedInput(_)));
}

#[tokio::test]
async fn test_locked_and_inactive_tenants_are_refused() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let tenant = onboard(&test.db, "ndirande").await;

    repo.check_access(tenant, today()).await.unwrap();

    repo.set_locked(&operator(), tenant, true).await.unwrap();
    let err = repo.check_access(tenant, today()).await.unwrap_err();
    assert_eq!(err, LedgerError::AccessDenied(AccessDenied::Locked));

    repo.set_locked(&operator(), tenant, false).await.unwrap();
    repo.set_active(&operator(), tenant, false).await.unwrap();
    let err = repo.check_access(tenant, today()).await.unwrap_err();
    assert_eq!(err, LedgerError::AccessDenied(AccessDenied::Inactive));

    repo.set_active(&operator(), tenant, true).await.unwrap();
    let tenant = repo.check_access(tenant, today()).await.unwrap();
    assert!(tenant.last_access_at.is_some());
}

#[tokio::test]
async fn test_unknown_tenant_is_not_authorized() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);

    let err = repo.check_access(TenantId::new(404), today()).await.unwrap_err();
    assert_eq!(err, LedgerError::NotAuthorized);

    let err = repo
        .set_locked(&operator(), TenantId::new(404), true)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
}

#[tokio::test]
async fn test_lapsed_trial_is_marked_expired() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let tenant = onboard(&test.db, "soche").await;

    // The last trial day still has access.
    repo.check_access(tenant, days_after(today(), 30)).await.unwrap();

    let err = repo
        .check_access(tenant, days_after(today(), 31))
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::AccessDenied(AccessDenied::TrialExpired));

    let stored = repo.get(tenant).await.unwrap().unwrap();
    assert_eq!(stored.subscription_status, SubscriptionStatus::Expired);

    let err = repo
        .check_access(tenant, days_after(today(), 32))
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::AccessDenied(AccessDenied::SubscriptionExpired));

    let log = AuditLog::new(test.db.clone()).recent(Some(tenant), 10).await.unwrap();
    assert!(
        log.iter()
            .any(|e| e.action == AuditAction::ExpireSubscription.as_str() && e.actor_type == "SYSTEM")
    );
}

#[tokio::test]
async fn test_payment_restores_access() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let tenant = onboard(&test.db, "mbayani").await;
    let later = days_after(today(), 60);

    assert!(repo.check_access(tenant, later).await.is_err());

    let err = repo
        .update_subscription(&operator(), tenant, later, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedInput(_)));

    let paid = repo
        .update_subscription(&operator(), tenant, later, 365)
        .await
        .unwrap();
    assert_eq!(paid.subscription_status, SubscriptionStatus::Paid);
    assert_eq!(paid.subscription_start, Some(later));
    assert_eq!(paid.subscription_end, Some(days_after(later, 365)));

    repo.check_access(tenant, later).await.unwrap();
}

#[tokio::test]
async fn test_lifetime_never_expires() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let tenant = onboard(&test.db, "chilomoni").await;

    let granted = repo.grant_lifetime(&operator(), tenant).await.unwrap();
    assert_eq!(granted.subscription_status, SubscriptionStatus::Lifetime);
    assert_eq!(granted.subscription_end, None);

    repo.check_access(tenant, days_after(today(), 5000)).await.unwrap();
    assert_eq!(repo.expire_lapsed(days_after(today(), 5000)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_expire_lapsed_sweeps_only_lapsed_tenants() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let lapsed = onboard(&test.db, "kanjedza").await;
    let renewed = onboard(&test.db, "limbe").await;
    let later = days_after(today(), 45);

    repo.update_subscription(&operator(), renewed, today(), 90)
        .await
        .unwrap();

    assert_eq!(repo.expire_lapsed(later).await.unwrap(), 1);
    assert_eq!(
        repo.get(lapsed).await.unwrap().unwrap().subscription_status,
        SubscriptionStatus::Expired
    );
    assert_eq!(
        repo.get(renewed).await.unwrap().unwrap().subscription_status,
        SubscriptionStatus::Paid
    );

    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.expired, 1);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.locked, 0);
}

#[tokio::test]
async fn test_delete_removes_everything_the_tenant_owns() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let doomed = onboard(&test.db, "bvumbwe").await;
    let survivor = onboard(&test.db, "goliati").await;

    LedgerRepository::new(test.db.clone())
        .add_credit(
            &ctx(doomed, "2026-2027"),
            NewCredit {
                date_received: today(),
                month: Month::April,
                line_items: vec![CreditLineItem {
                    item_id: "pow1_row1".into(),
                    amount: dec!(100),
                }],
                remarks: String::new(),
            },
        )
        .await
        .unwrap();
    MessageRepository::new(test.db.clone())
        .send(doomed, "Welcome", MessageKind::Info)
        .await
        .unwrap();

    assert!(repo.delete(&operator(), doomed).await.unwrap());
    assert!(!repo.delete(&operator(), doomed).await.unwrap());

    assert!(repo.get(doomed).await.unwrap().is_none());
    assert_eq!(credits::Entity::find().count(&test.db).await.unwrap(), 0);
    let remaining = budget_lines::Entity::find()
        .filter(budget_lines::Column::TenantId.eq(survivor.into_inner()))
        .count(&test.db)
        .await
        .unwrap();
    assert_eq!(remaining, 42);
    assert_eq!(budget_lines::Entity::find().count(&test.db).await.unwrap(), 42);

    let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|t| t.username).collect();
    assert_eq!(names, vec!["goliati".to_string()]);
}

#[tokio::test]
async fn test_messages_are_per_tenant() {
    let test = setup().await;
    let first = onboard(&test.db, "chileka").await;
    let second = onboard(&test.db, "lunzu").await;
    let messages = MessageRepository::new(test.db.clone());

    let sent = messages
        .send(first, "Payment received, thank you.", MessageKind::Info)
        .await
        .unwrap();
    assert!(!sent.is_read);

    let err = messages.send(first, "   ", MessageKind::Info).await.unwrap_err();
    assert!(matches!(err, LedgerError::MalformedInput(_)));
    let err = messages
        .send(TenantId::new(999), "hello", MessageKind::Info)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));

    assert!(messages.list_for_tenant(second, false).await.unwrap().is_empty());
    assert!(!messages.mark_read(second, sent.id).await.unwrap());
    assert!(!messages.mark_read(first, MessageId::new(12345)).await.unwrap());

    assert!(messages.mark_read(first, sent.id).await.unwrap());
    assert!(messages.list_for_tenant(first, true).await.unwrap().is_empty());
    assert_eq!(messages.list_for_tenant(first, false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_expiry_warnings_go_to_tenants_near_their_end_date() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let ending = onboard(&test.db, "mpemba").await;
    let renewed = onboard(&test.db, "lirangwe").await;
    let lifetime = onboard(&test.db, "chigumula").await;

    repo.update_subscription(&operator(), renewed, today(), 365)
        .await
        .unwrap();
    repo.grant_lifetime(&operator(), lifetime).await.unwrap();

    let messages = MessageRepository::new(test.db.clone());
    let warned = messages
        .send_expiry_warnings(days_after(today(), 25), 7)
        .await
        .unwrap();

    let ids: Vec<TenantId> = warned.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![ending]);

    let inbox = messages.list_for_tenant(ending, true).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, MessageKind::Warning);
    assert!(inbox[0].message.contains("trial"));
    assert!(messages.list_for_tenant(renewed, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_operator_actions_are_audited() {
    let test = setup().await;
    let repo = tenants_repo(&test.db);
    let tenant = onboard(&test.db, "namiwawa").await;

    repo.set_locked(&operator(), tenant, true).await.unwrap();
    repo.update_subscription(&operator(), tenant, today(), 30)
        .await
        .unwrap();

    let log = AuditLog::new(test.db.clone()).recent(Some(tenant), 10).await.unwrap();
    let actions: Vec<&str> = log.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(log.len(), 3);
    assert!(actions.contains(&AuditAction::OnboardTenant.as_str()));
    assert!(actions.contains(&AuditAction::LockTenant.as_str()));
    assert!(actions.contains(&AuditAction::UpdateSubscription.as_str()));
    assert!(log.iter().all(|e| e.actor_name == "ops"));
    assert!(log.iter().all(|e| e.target_tenant_id == Some(tenant)));
}

#[tokio::test]
async fn test_settings_default_then_upsert() {
    let test = setup().await;
    let tenant = onboard(&test.db, "mitsidi").await;
    let repo = SettingsRepository::new(test.db.clone());
    let year = ctx(tenant, "2029-2030");

    let defaults = repo.get_settings(&year).await.unwrap();
    assert!(!defaults.is_persisted);
    assert_eq!(defaults.ministry_department, DEFAULT_MINISTRY);
    assert_eq!(defaults.total_grant, dec!(0));

    let mut input = Settings {
        school_name: "Mitsidi CDSS".into(),
        total_grant: dec!(-1),
        ..Settings::default()
    };
    let err = repo.save_settings(&year, &input).await.unwrap_err();
    assert!(matches!(err, LedgerError::MalformedInput(_)));

    input.total_grant = dec!(120000.50);
    repo.save_settings(&year, &input).await.unwrap();
    input.compiled_by = "Bursar".into();
    repo.save_settings(&year, &input).await.unwrap();

    let stored = repo.get_settings(&year).await.unwrap();
    assert!(stored.is_persisted);
    assert_eq!(stored.total_grant, dec!(120000.50));
    assert_eq!(stored.compiled_by, "Bursar");

    let rows = settings::Entity::find()
        .filter(settings::Column::TenantId.eq(tenant.into_inner()))
        .count(&test.db)
        .await
        .unwrap();
    assert_eq!(rows, 2);
}
