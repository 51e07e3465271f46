//! Fixed query documents sent to the GraphQL engine.

pub const USER_PROFILE: &str = r#"
query {
  user {
    id
    login
    firstName
    lastName
    campus
    auditRatio
    attrs
  }
}
"#;

/// Newest first from the engine; the series builder re-sorts.
pub const XP_TRANSACTIONS: &str = r#"
query {
  transaction(
    where: { type: { _eq: "xp" } }
    order_by: { createdAt: desc }
    limit: 10000
  ) {
    amount
    createdAt
    path
  }
}
"#;

/// One row per skill type, the highest amount for each.
pub const SKILLS: &str = r#"
query {
  transaction(
    where: { type: { _like: "skill_%" } }
    distinct_on: type
    order_by: [{ type: asc }, { amount: desc }]
  ) {
    type
    amount
    createdAt
  }
}
"#;
