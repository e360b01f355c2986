//! The ordered list of legacy migration steps

/// Where a step runs relative to the schema sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the embedded migrations
    Schema,
    /// After the embedded migrations
    Data,
    Cleanup,
}

#[derive(Debug, Clone)]
pub struct LegacyStep {
    pub name: String,
    pub phase: Phase,
    pub sql: String,
}

impl LegacyStep {
    fn new(name: impl Into<String>, phase: Phase, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase,
            sql: sql.into(),
        }
    }
}

pub const SCHEMA_SYNC_STEP: &str = "sync_schema";

/// Tables that used to carry a soft-delete `deletedAt` column
pub const PARANOID_TABLES: [&str; 9] = [
    "users",
    "groups",
    "group_users",
    "Transcripts",
    "Summaries",
    "Interviews",
    "InterviewFeedbacks",
    "Assessments",
    "Calibrations",
];

/// Wraps `body` in a DO block that only runs when `condition` holds
fn guarded(condition: &str, body: &str) -> String {
    format!(
        "DO $$\nBEGIN\n  IF {condition} THEN\n    {body}\n  END IF;\nEND $$;"
    )
}

fn table_exists(table: &str) -> String {
    format!(
        "EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = '{table}')"
    )
}

fn column_exists(table: &str, column: &str) -> String {
    format!(
        "EXISTS (SELECT 1 FROM information_schema.columns \
         WHERE table_name = '{table}' AND column_name = '{column}')"
    )
}

fn rename_column(table: &str, from: &str, to: &str) -> LegacyStep {
    LegacyStep::new(
        format!("rename_{table}_{from}_to_{to}"),
        Phase::Schema,
        guarded(
            &column_exists(table, from),
            &format!(r#"ALTER TABLE "{table}" RENAME COLUMN "{from}" TO "{to}";"#),
        ),
    )
}

fn drop_column(table: &str, column: &str) -> LegacyStep {
    LegacyStep::new(
        format!("drop_{table}_{column}"),
        Phase::Schema,
        guarded(
            &column_exists(table, column),
            &format!(r#"ALTER TABLE "{table}" DROP COLUMN "{column}";"#),
        ),
    )
}

/// Deletes soft-deleted rows, then drops the `deletedAt` column
fn drop_paranoid(table: &str) -> LegacyStep {
    LegacyStep::new(
        format!("drop_paranoid_{table}"),
        Phase::Schema,
        guarded(
            &column_exists(table, "deletedAt"),
            &format!(
                r#"DELETE FROM "{table}" WHERE "deletedAt" IS NOT NULL;
    ALTER TABLE "{table}" DROP COLUMN "deletedAt";"#
            ),
        ),
    )
}

/// All steps, in execution order within each phase
pub fn legacy_steps() -> Vec<LegacyStep> {
    let mut steps = vec![
        LegacyStep::new(
            "rename_Partnerships_to_Mentorships",
            Phase::Schema,
            guarded(
                &table_exists("Partnerships"),
                r#"ALTER TABLE "Partnerships" RENAME TO "Mentorships";"#,
            ),
        ),
        LegacyStep::new(
            "replace_AdhocMentor_role",
            Phase::Schema,
            guarded(
                &table_exists("users"),
                r#"UPDATE "users"
    SET roles = array_replace(roles, 'AdhocMentor', 'TransactionalMentor')
    WHERE 'AdhocMentor' = ANY (roles);"#,
            ),
        ),
        rename_column("Mentorships", "endedAt", "relationalEndedAt"),
        rename_column("Mentorships", "relationalEndedAt", "endsAt"),
        LegacyStep::new(
            "add_Mentorships_transactional",
            Phase::Schema,
            guarded(
                &format!(
                    "{} AND NOT {}",
                    table_exists("Mentorships"),
                    column_exists("Mentorships", "transactional")
                ),
                r#"ALTER TABLE "Mentorships" ADD COLUMN "transactional" BOOLEAN DEFAULT false;
    UPDATE "Mentorships" SET "transactional" = false WHERE "transactional" IS NULL;
    ALTER TABLE "Mentorships" ALTER COLUMN "transactional" SET NOT NULL;
    ALTER TABLE "Mentorships" ALTER COLUMN "transactional" DROP DEFAULT;"#,
            ),
        ),
        drop_column("Mentorships", "coachId"),
        drop_column("groups", "coachingPartnershipId"),
    ];

    steps.extend(PARANOID_TABLES.iter().map(|table| drop_paranoid(table)));

    steps.push(LegacyStep::new(
        "migrate_fake_emails",
        Phase::Data,
        r#"UPDATE users SET "email" = REPLACE("email", '@ub.nd', '@f.ml')
WHERE "email" LIKE '%@ub.nd';"#,
    ));

    // Profile updates write lowercase pinyin; older rows may be uppercase
    steps.push(LegacyStep::new(
        "normalize_pinyin_case",
        Phase::Data,
        r#"UPDATE users SET "pinyin" = LOWER("pinyin")
WHERE "pinyin" <> LOWER("pinyin");"#,
    ));

    steps.push(LegacyStep::new(
        "cleanup_feedback_attempt_logs",
        Phase::Cleanup,
        guarded(
            &table_exists("InterviewFeedbackUpdateAttempts"),
            r#"DELETE FROM "InterviewFeedbackUpdateAttempts"
    WHERE "createdAt" < NOW() - INTERVAL '30 days';"#,
        ),
    ));

    steps
}
