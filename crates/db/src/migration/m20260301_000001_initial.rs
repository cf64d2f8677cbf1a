//! Initial schema: tenants, their settings and budgets, the ledger, and the
//! operator tables.
//!
//! SQLite runs one statement per call here, so each table and index is its
//! own constant. Every tenant-owned table cascades on tenant deletion, and
//! the unique keys below are what make seeding and numbering safe under
//! concurrency.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for statement in UP {
            db.execute_unprepared(statement).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in DROP_ORDER {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table};"))
                .await?;
        }
        Ok(())
    }
}

const UP: [&str; 14] = [
    TENANTS_SQL,
    SETTINGS_SQL,
    BUDGET_LINES_SQL,
    CREDITS_SQL,
    CREDITS_INDEX_SQL,
    DEBITS_SQL,
    DEBITS_INDEX_SQL,
    DEBITS_ITEM_INDEX_SQL,
    DOCUMENT_SEQUENCES_SQL,
    SUBSCRIPTION_MESSAGES_SQL,
    SUBSCRIPTION_MESSAGES_INDEX_SQL,
    AUDIT_LOGS_SQL,
    AUDIT_LOGS_TARGET_INDEX_SQL,
    AUDIT_LOGS_CREATED_INDEX_SQL,
];

const DROP_ORDER: [&str; 8] = [
    "audit_logs",
    "subscription_messages",
    "document_sequences",
    "debits",
    "credits",
    "budget_lines",
    "settings",
    "tenants",
];

const TENANTS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS tenants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    school_name TEXT NOT NULL,
    username TEXT NOT NULL UNIQUE,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_locked INTEGER NOT NULL DEFAULT 0,
    subscription_status TEXT NOT NULL DEFAULT 'UNPAID'
        CHECK (subscription_status IN ('TRIAL', 'PAID', 'UNPAID', 'EXPIRED', 'LIFETIME')),
    subscription_start TEXT,
    subscription_end TEXT,
    last_access_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const SETTINGS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    financial_year TEXT NOT NULL,
    school_name TEXT NOT NULL DEFAULT '',
    school_address TEXT NOT NULL DEFAULT '',
    ministry_department TEXT NOT NULL DEFAULT 'Education',
    total_grant TEXT NOT NULL DEFAULT '0',
    compiled_by TEXT NOT NULL DEFAULT '',
    entered_by TEXT NOT NULL DEFAULT '',
    authorizing_officer TEXT NOT NULL DEFAULT '',
    authorizing_appointment TEXT NOT NULL DEFAULT '',
    counter_sign TEXT NOT NULL DEFAULT '',
    counter_appointment TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (tenant_id, financial_year)
)";

// One row per template slot per tenant and year.
const BUDGET_LINES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS budget_lines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    financial_year TEXT NOT NULL,
    template_slot INTEGER NOT NULL CHECK (template_slot BETWEEN 1 AND 42),
    item_key TEXT NOT NULL,
    program_no INTEGER NOT NULL,
    program_name TEXT NOT NULL,
    sub_activity TEXT NOT NULL,
    description TEXT NOT NULL,
    code TEXT NOT NULL,
    total_allocation TEXT NOT NULL DEFAULT '0',
    monthly_allocations TEXT NOT NULL DEFAULT '{}',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (tenant_id, financial_year, template_slot)
)";

const CREDITS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS credits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    financial_year TEXT NOT NULL,
    date_received TEXT NOT NULL,
    month TEXT NOT NULL,
    line_items TEXT NOT NULL,
    remarks TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)";

const CREDITS_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_credits_scope ON credits(tenant_id, financial_year)";

const DEBITS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS debits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    financial_year TEXT NOT NULL,
    document_number TEXT,
    loose_minute_number TEXT,
    receipt_number TEXT,
    date_paid TEXT NOT NULL,
    month TEXT NOT NULL,
    item_id TEXT NOT NULL,
    sub_item_description TEXT NOT NULL DEFAULT '',
    code TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL,
    amount TEXT NOT NULL,
    supplier_name TEXT NOT NULL DEFAULT '',
    position TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)";

const DEBITS_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_debits_scope ON debits(tenant_id, financial_year)";

const DEBITS_ITEM_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_debits_item ON debits(tenant_id, financial_year, item_id)";

// Last number issued per document type. The numbers on debits stay the
// source of truth; this row is the write lock target and an audit aid.
const DOCUMENT_SEQUENCES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS document_sequences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    financial_year TEXT NOT NULL,
    voucher_last_no INTEGER NOT NULL DEFAULT 0,
    loose_minute_last_no INTEGER NOT NULL DEFAULT 0,
    receipt_last_no INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL,
    UNIQUE (tenant_id, financial_year)
)";

const SUBSCRIPTION_MESSAGES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS subscription_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    message TEXT NOT NULL,
    message_type TEXT NOT NULL DEFAULT 'INFO' CHECK (message_type IN ('INFO', 'WARNING')),
    is_read INTEGER NOT NULL DEFAULT 0,
    sent_at TEXT NOT NULL
)";

const SUBSCRIPTION_MESSAGES_INDEX_SQL: &str = "CREATE INDEX IF NOT EXISTS idx_messages_tenant ON subscription_messages(tenant_id, is_read)";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS audit_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    actor_type TEXT NOT NULL,
    actor_name TEXT NOT NULL,
    action TEXT NOT NULL,
    target_tenant_id INTEGER,
    detail TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)";

const AUDIT_LOGS_TARGET_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_audit_logs_target ON audit_logs(target_tenant_id)";

const AUDIT_LOGS_CREATED_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_audit_logs_created ON audit_logs(created_at)";
