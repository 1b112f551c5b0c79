//! Integration tests for shoots, the board ordering, and resource
//! associations.
//!
//! Exercises the repository layer against a real database:
//! - Positions stay dense when cards are created, moved, and deleted
//! - Rows from another team are invisible
//! - Association replacement is all-or-nothing
//! - Personnel attach as participants without touching ad-hoc ones

use assert_matches::assert_matches;
use shootboard_core::resources::ResourceKind;
use shootboard_core::shoot::{STATUS_IDEA, STATUS_PLANNING};
use shootboard_db::models::equipment::CreateEquipment;
use shootboard_db::models::participant::NewParticipant;
use shootboard_db::models::personnel::CreatePersonnel;
use shootboard_db::models::prop::CreateProp;
use shootboard_db::models::shoot::{CreateShoot, Shoot};
use shootboard_db::models::team::CreateTeam;
use shootboard_db::models::user::CreateUser;
use shootboard_db::repositories::{
    EquipmentRepo, ParticipantRepo, PersonnelRepo, PropRepo, ShootRepo, ShootResourceRepo,
    TeamRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a user with their own team; returns `(user_id, team_id)`.
async fn seed_team(pool: &PgPool, email: &str) -> (i64, i64) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: "Tester".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap();
    let team = TeamRepo::create_with_owner(
        pool,
        &CreateTeam {
            name: format!("{email} crew"),
            description: None,
        },
        user.id,
    )
    .await
    .unwrap();
    (user.id, team.id)
}

fn new_shoot(title: &str) -> CreateShoot {
    CreateShoot {
        title: title.to_string(),
        description: None,
        status: None,
        shoot_date: None,
        start_time: None,
        end_time: None,
        location_id: None,
        location_note: None,
        color: None,
        image_url: None,
    }
}

fn new_equipment(name: &str) -> CreateEquipment {
    CreateEquipment {
        name: name.to_string(),
        category: None,
        brand: None,
        model: None,
        quantity: None,
        notes: None,
        image_url: None,
    }
}

async fn column(pool: &PgPool, team_id: i64, status: &str) -> Vec<(i64, i32)> {
    ShootRepo::list_for_board(pool, team_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|s: &Shoot| s.status == status)
        .map(|s| (s.id, s.position))
        .collect()
}

// ---------------------------------------------------------------------------
// Board ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_appends_to_column(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "a@example.com").await;

    let first = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &new_shoot("One"))
        .await
        .unwrap();
    let second = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &new_shoot("Two"))
        .await
        .unwrap();
    let planned = ShootRepo::create(&pool, team_id, user_id, STATUS_PLANNING, &new_shoot("P"))
        .await
        .unwrap();

    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);
    assert_eq!(planned.position, 0);
    assert_eq!(first.created_by, Some(user_id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_creates_keep_column_dense(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "race@example.com").await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let input = new_shoot(&format!("S{i}"));
                ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &input)
                    .await
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let mut positions: Vec<i32> = column(&pool, team_id, STATUS_IDEA)
        .await
        .into_iter()
        .map(|(_, p)| p)
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, (0..16).collect::<Vec<i32>>());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_moves_keep_both_columns_dense(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "moves@example.com").await;
    let mut ids = Vec::new();
    for i in 0..10 {
        let input = new_shoot(&format!("M{i}"));
        let s = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &input)
            .await
            .unwrap();
        ids.push(s.id);
    }

    let handles: Vec<_> = ids
        .iter()
        .step_by(2)
        .map(|&id| {
            let pool = pool.clone();
            tokio::spawn(async move {
                ShootRepo::move_to(&pool, team_id, id, STATUS_PLANNING, Some(0))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_some());
    }

    for (status, len) in [(STATUS_IDEA, 5), (STATUS_PLANNING, 5)] {
        let mut positions: Vec<i32> = column(&pool, team_id, status)
            .await
            .into_iter()
            .map(|(_, p)| p)
            .collect();
        positions.sort_unstable();
        assert_eq!(positions, (0..len).collect::<Vec<i32>>(), "column {status}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_resequences_both_columns(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "b@example.com").await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let s = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &new_shoot(title))
            .await
            .unwrap();
        ids.push(s.id);
    }
    let p = ShootRepo::create(&pool, team_id, user_id, STATUS_PLANNING, &new_shoot("P"))
        .await
        .unwrap();

    // Move B to the front of planning.
    let moved = ShootRepo::move_to(&pool, team_id, ids[1], STATUS_PLANNING, Some(0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.status, STATUS_PLANNING);
    assert_eq!(moved.position, 0);

    assert_eq!(column(&pool, team_id, STATUS_IDEA).await, vec![(ids[0], 0), (ids[2], 1)]);
    assert_eq!(column(&pool, team_id, STATUS_PLANNING).await, vec![(ids[1], 0), (p.id, 1)]);

    // Reorder within a column; out-of-range positions clamp to the end.
    ShootRepo::move_to(&pool, team_id, ids[0], STATUS_IDEA, Some(99))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(column(&pool, team_id, STATUS_IDEA).await, vec![(ids[2], 0), (ids[0], 1)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_closes_gap(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "c@example.com").await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let s = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &new_shoot(title))
            .await
            .unwrap();
        ids.push(s.id);
    }

    assert!(ShootRepo::delete(&pool, team_id, ids[0]).await.unwrap());
    assert!(!ShootRepo::delete(&pool, team_id, ids[0]).await.unwrap());
    assert_eq!(column(&pool, team_id, STATUS_IDEA).await, vec![(ids[1], 0), (ids[2], 1)]);
}

// ---------------------------------------------------------------------------
// Team scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_team_rows_are_invisible(pool: PgPool) {
    let (user_a, team_a) = seed_team(&pool, "owner-a@example.com").await;
    let (user_b, team_b) = seed_team(&pool, "owner-b@example.com").await;

    let shoot = ShootRepo::create(&pool, team_a, user_a, STATUS_IDEA, &new_shoot("Secret"))
        .await
        .unwrap();
    let lens = EquipmentRepo::create(&pool, team_a, &new_equipment("85mm"))
        .await
        .unwrap();

    assert_matches!(ShootRepo::find_by_id(&pool, team_b, shoot.id).await, Ok(None));
    assert_matches!(
        ShootRepo::move_to(&pool, team_b, shoot.id, STATUS_PLANNING, None).await,
        Ok(None)
    );
    assert!(!ShootRepo::delete(&pool, team_b, shoot.id).await.unwrap());
    assert_matches!(EquipmentRepo::find_by_id(&pool, team_b, lens.id).await, Ok(None));
    assert!(!EquipmentRepo::delete(&pool, team_b, lens.id).await.unwrap());

    // Team B cannot attach team A's equipment to its own shoot.
    let b_shoot = ShootRepo::create(&pool, team_b, user_b, STATUS_IDEA, &new_shoot("Mine"))
        .await
        .unwrap();
    let attached =
        ShootResourceRepo::attach(&pool, team_b, b_shoot.id, ResourceKind::Equipment, lens.id)
            .await
            .unwrap();
    assert!(!attached);
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_sets_and_rollback(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "d@example.com").await;
    let (_, other_team) = seed_team(&pool, "e@example.com").await;
    let shoot = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &new_shoot("Set"))
        .await
        .unwrap();

    let cam = EquipmentRepo::create(&pool, team_id, &new_equipment("Body")).await.unwrap();
    let lens = EquipmentRepo::create(&pool, team_id, &new_equipment("Lens")).await.unwrap();
    let foreign = EquipmentRepo::create(&pool, other_team, &new_equipment("Theirs"))
        .await
        .unwrap();
    let sword = PropRepo::create(
        &pool,
        team_id,
        &CreateProp {
            name: "Sword".into(),
            status: None,
            notes: None,
            image_url: None,
        },
    )
    .await
    .unwrap();

    let failed = ShootResourceRepo::replace_many(
        &pool,
        team_id,
        shoot.id,
        &[
            (ResourceKind::Props, &[sword.id][..]),
            (ResourceKind::Equipment, &[cam.id, foreign.id][..]),
        ],
    )
    .await
    .unwrap();
    assert_eq!(failed, Some((ResourceKind::Equipment, foreign.id)));
    // The props set was rolled back along with the failing kind.
    assert!(ShootResourceRepo::list_ids(&pool, shoot.id, ResourceKind::Props)
        .await
        .unwrap()
        .is_empty());

    let ok = ShootResourceRepo::replace_many(
        &pool,
        team_id,
        shoot.id,
        &[(ResourceKind::Equipment, &[lens.id, cam.id, cam.id][..])],
    )
    .await
    .unwrap();
    assert_eq!(ok, None);
    let mut expected = vec![cam.id, lens.id];
    expected.sort();
    assert_eq!(
        ShootResourceRepo::list_ids(&pool, shoot.id, ResourceKind::Equipment)
            .await
            .unwrap(),
        expected
    );

    // Replacing with a smaller set removes the rest.
    ShootResourceRepo::replace_many(
        &pool,
        team_id,
        shoot.id,
        &[(ResourceKind::Equipment, &[lens.id][..])],
    )
    .await
    .unwrap();
    let attached = EquipmentRepo::list_for_shoot(&pool, shoot.id).await.unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].name, "Lens");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_personnel_attach_as_participants(pool: PgPool) {
    let (user_id, team_id) = seed_team(&pool, "f@example.com").await;
    let shoot = ShootRepo::create(&pool, team_id, user_id, STATUS_IDEA, &new_shoot("Crew"))
        .await
        .unwrap();
    let photographer = PersonnelRepo::create(
        &pool,
        team_id,
        &CreatePersonnel {
            name: "Rin".into(),
            role: Some("Photographer".into()),
            email: None,
            phone: None,
            instagram: None,
            notes: None,
            image_url: None,
        },
    )
    .await
    .unwrap();
    ParticipantRepo::create(
        &pool,
        shoot.id,
        &NewParticipant {
            personnel_id: None,
            name: "Walk-in helper".into(),
            role: None,
            character_name: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    for _ in 0..2 {
        let ok = ShootResourceRepo::attach(
            &pool,
            team_id,
            shoot.id,
            ResourceKind::Personnel,
            photographer.id,
        )
        .await
        .unwrap();
        assert!(ok);
    }

    let participants = ParticipantRepo::list_for_shoot(&pool, shoot.id).await.unwrap();
    assert_eq!(participants.len(), 2);
    let linked = participants
        .iter()
        .find(|p| p.personnel_id == Some(photographer.id))
        .unwrap();
    assert_eq!(linked.name, "Rin");
    assert_eq!(linked.role.as_deref(), Some("Photographer"));

    // Clearing the personnel set keeps the ad-hoc participant.
    ShootResourceRepo::replace_many(&pool, team_id, shoot.id, &[(ResourceKind::Personnel, &[][..])])
        .await
        .unwrap();
    let remaining = ParticipantRepo::list_for_shoot(&pool, shoot.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].personnel_id, None);
}
