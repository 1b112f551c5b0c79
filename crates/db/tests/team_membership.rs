//! Integration tests for teams, memberships, and users.

use assert_matches::assert_matches;
use shootboard_core::roles::{ROLE_ADMIN, ROLE_MEMBER, ROLE_OWNER};
use shootboard_db::models::team::CreateTeam;
use shootboard_db::models::user::{CreateUser, User};
use shootboard_db::repositories::{MemberChange, TeamMemberRepo, TeamRepo, UserRepo};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: email.split('@').next().unwrap_or(email).to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

fn team(name: &str) -> CreateTeam {
    CreateTeam {
        name: name.to_string(),
        description: Some("Weekend shoots".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_team_makes_owner_and_active(pool: PgPool) {
    let user = new_user(&pool, "owner@example.com").await;
    assert_eq!(user.active_team_id, None);

    let created = TeamRepo::create_with_owner(&pool, &team("Studio"), user.id)
        .await
        .unwrap();

    let membership = TeamMemberRepo::find(&pool, created.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(membership.role, ROLE_OWNER);
    assert_eq!(TeamMemberRepo::count_owners(&pool, created.id).await.unwrap(), 1);

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.active_team_id, Some(created.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_lookup_is_case_insensitive_and_unique(pool: PgPool) {
    let user = new_user(&pool, "Mixed@Example.com").await;
    let found = UserRepo::find_by_email(&pool, "mixed@example.COM")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let dup = UserRepo::create(
        &pool,
        &CreateUser {
            email: "MIXED@example.com".into(),
            display_name: "Dup".into(),
            password_hash: "x".into(),
        },
    )
    .await;
    assert_matches!(dup, Err(sqlx::Error::Database(e)) if e.constraint() == Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_membership_lifecycle(pool: PgPool) {
    let owner = new_user(&pool, "lead@example.com").await;
    let helper = new_user(&pool, "helper@example.com").await;
    let first = TeamRepo::create_with_owner(&pool, &team("First"), owner.id)
        .await
        .unwrap();
    let second = TeamRepo::create_with_owner(&pool, &team("Second"), owner.id)
        .await
        .unwrap();

    TeamMemberRepo::add(&pool, first.id, helper.id, ROLE_MEMBER)
        .await
        .unwrap();
    let dup = TeamMemberRepo::add(&pool, first.id, helper.id, ROLE_MEMBER).await;
    assert_matches!(dup, Err(sqlx::Error::Database(e)) if e.constraint() == Some("uq_team_members_team_user"));

    let promoted = TeamMemberRepo::update_role(&pool, first.id, helper.id, ROLE_ADMIN)
        .await
        .unwrap();
    assert_matches!(promoted, MemberChange::Applied(m) if m.role == ROLE_ADMIN);

    let members = TeamMemberRepo::list_for_team(&pool, first.id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].user_id, owner.id);
    assert_eq!(members[1].email, "helper@example.com");

    // Owner's teams come back oldest membership first.
    let teams = TeamRepo::list_for_user(&pool, owner.id).await.unwrap();
    let ids: Vec<i64> = teams.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    // Leaving the active team clears it; fallback is the oldest remaining.
    UserRepo::set_active_team(&pool, helper.id, Some(first.id)).await.unwrap();
    assert_eq!(
        TeamMemberRepo::remove(&pool, first.id, helper.id).await.unwrap(),
        MemberChange::Applied(())
    );
    assert_eq!(
        TeamMemberRepo::remove(&pool, first.id, helper.id).await.unwrap(),
        MemberChange::NotFound
    );
    let helper = UserRepo::find_by_id(&pool, helper.id).await.unwrap().unwrap();
    assert_eq!(helper.active_team_id, None);
    assert_matches!(TeamMemberRepo::first_for_user(&pool, helper.id).await, Ok(None));

    let fallback = TeamMemberRepo::first_for_user(&pool, owner.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fallback.team_id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_team_clears_active_team(pool: PgPool) {
    let user = new_user(&pool, "solo@example.com").await;
    let created = TeamRepo::create_with_owner(&pool, &team("Gone"), user.id)
        .await
        .unwrap();

    assert!(TeamRepo::delete(&pool, created.id).await.unwrap());
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.active_team_id, None);
    assert!(TeamRepo::list_for_user(&pool, user.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_last_owner_is_kept(pool: PgPool) {
    let owner = new_user(&pool, "keep@example.com").await;
    let created = TeamRepo::create_with_owner(&pool, &team("Kept"), owner.id)
        .await
        .unwrap();

    assert_eq!(
        TeamMemberRepo::update_role(&pool, created.id, owner.id, ROLE_MEMBER)
            .await
            .unwrap(),
        MemberChange::LastOwner
    );
    assert_eq!(
        TeamMemberRepo::remove(&pool, created.id, owner.id).await.unwrap(),
        MemberChange::LastOwner
    );
    assert_eq!(TeamMemberRepo::count_owners(&pool, created.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owners_demoting_each_other_leave_one_owner(pool: PgPool) {
    let a = new_user(&pool, "co-a@example.com").await;
    let b = new_user(&pool, "co-b@example.com").await;

    for round in 0..10 {
        let created = TeamRepo::create_with_owner(&pool, &team(&format!("Duo {round}")), a.id)
            .await
            .unwrap();
        TeamMemberRepo::add(&pool, created.id, b.id, ROLE_OWNER)
            .await
            .unwrap();

        let (pool_a, pool_b) = (pool.clone(), pool.clone());
        let team_id = created.id;
        let demote_b = tokio::spawn(async move {
            TeamMemberRepo::update_role(&pool_a, team_id, b.id, ROLE_MEMBER).await.unwrap()
        });
        let demote_a = tokio::spawn(async move {
            TeamMemberRepo::update_role(&pool_b, team_id, a.id, ROLE_MEMBER).await.unwrap()
        });
        let outcomes = [demote_b.await.unwrap(), demote_a.await.unwrap()];

        let applied = outcomes
            .iter()
            .filter(|o| matches!(o, MemberChange::Applied(_)))
            .count();
        assert_eq!(applied, 1, "round {round}: {outcomes:?}");
        assert!(outcomes.contains(&MemberChange::LastOwner));
        assert_eq!(TeamMemberRepo::count_owners(&pool, team_id).await.unwrap(), 1);
    }
}
