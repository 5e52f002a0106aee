//! Integration tests for shape, tracker, aura and ownership persistence.
//!
//! Exercises the repository layer against a real database:
//! - Shape and subtype rows created and deleted together
//! - Cascade delete of trackers, auras and owners
//! - Layer deletion removing its shapes
//! - Partial updates
//! - Idempotent ownership grants

use sqlx::PgPool;
use tabletop_core::shape_kind::ShapeKind;
use tabletop_db::models::aura::{CreateAura, UpdateAura};
use tabletop_db::models::layer::CreateLayer;
use tabletop_db::models::shape::{CreateShape, Shape, UpdateShape};
use tabletop_db::models::subtype::{Circle, CircularToken, Polygon, ShapeSubtype};
use tabletop_db::models::tracker::{CreateTracker, UpdateTracker};
use tabletop_db::models::user::CreateUser;
use tabletop_db::repositories::{
    AuraRepo, LayerRepo, ShapeOwnerRepo, ShapeRepo, ShapeSubtypeRepo, TrackerRepo, UserRepo,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_layer(pool: &PgPool) -> i64 {
    LayerRepo::create(
        pool,
        &CreateLayer {
            name: "tokens".to_string(),
            location: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn token() -> ShapeSubtype {
    ShapeSubtype::CircularToken(CircularToken {
        circle: Circle { radius: 25.0 },
        text: "O".to_string(),
        font: "12px serif".to_string(),
    })
}

async fn new_token(pool: &PgPool, layer_id: i64) -> Shape {
    ShapeRepo::create(pool, &CreateShape::new(Uuid::new_v4(), layer_id, 0.0, 0.0, token()))
        .await
        .unwrap()
}

fn new_tracker(name: &str, visible: bool) -> CreateTracker {
    CreateTracker {
        uuid: Uuid::new_v4(),
        visible,
        name: name.to_string(),
        value: 5,
        maxvalue: 5,
    }
}

fn new_aura(name: &str) -> CreateAura {
    CreateAura {
        uuid: Uuid::new_v4(),
        vision_source: false,
        visible: true,
        name: name.to_string(),
        value: 10,
        dim: 5,
        colour: "#fff".to_string(),
    }
}

async fn count(pool: &PgPool, table: &str, uuid: Uuid) -> i64 {
    let column = if table == "trackers" || table == "auras" || table == "shape_owners" {
        "shape_uuid"
    } else {
        "uuid"
    };
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE {column} = $1"))
        .bind(uuid)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let input = CreateShape::new(Uuid::new_v4(), layer_id, 3.5, -2.0, token());

    let shape = ShapeRepo::create(&pool, &input).await.unwrap();

    assert_eq!(shape.uuid, input.uuid);
    assert_eq!(shape.type_, "circulartoken");
    assert_eq!(shape.kind().unwrap(), ShapeKind::CircularToken);
    assert_eq!(shape.x, 3.5);
    assert!(shape.name_visible);
    assert_eq!(shape.fill_colour, "#000");
    assert_eq!(shape.stroke_colour, "#fff");
    assert_eq!(shape.draw_operator, "source-over");
    assert_eq!(shape.annotation, "");
    assert_eq!(shape.options, None);

    let subtype = ShapeSubtypeRepo::find(&pool, ShapeKind::CircularToken, shape.uuid)
        .await
        .unwrap();
    assert_eq!(subtype, Some(token()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_subtype_insert_rolls_back_shape(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let uuid = Uuid::new_v4();
    sqlx::query("ALTER TABLE polygons ADD CONSTRAINT polygons_never CHECK (false)")
        .execute(&pool)
        .await
        .unwrap();

    let input = CreateShape::new(
        uuid,
        layer_id,
        0.0,
        0.0,
        ShapeSubtype::Polygon(Polygon {
            vertices: vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]],
        }),
    );
    assert!(ShapeRepo::create(&pool, &input).await.is_err());
    assert!(ShapeRepo::find_by_id(&pool, uuid).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_patches_only_given_fields(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let mut input = CreateShape::new(Uuid::new_v4(), layer_id, 0.0, 0.0, token());
    input.name = Some("Orc".to_string());
    ShapeRepo::create(&pool, &input).await.unwrap();

    let updated = ShapeRepo::update(
        &pool,
        input.uuid,
        &UpdateShape {
            x: Some(40.0),
            name_visible: Some(false),
            index: Some(9),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.x, 40.0);
    assert_eq!(updated.y, 0.0);
    assert!(!updated.name_visible);
    assert_eq!(updated.index, 9);
    assert_eq!(updated.name.as_deref(), Some("Orc"));

    let missing = ShapeRepo::update(&pool, Uuid::new_v4(), &UpdateShape::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_keeps_nullable_fields_when_omitted(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let mut input = CreateShape::new(Uuid::new_v4(), layer_id, 0.0, 0.0, token());
    input.name = Some("Orc".to_string());
    input.options = Some("[[\"hp_bar\", true]]".to_string());
    ShapeRepo::create(&pool, &input).await.unwrap();

    let updated = ShapeRepo::update(
        &pool,
        input.uuid,
        &UpdateShape {
            name: None,
            options: None,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name.as_deref(), Some("Orc"));
    assert_eq!(updated.options, input.options);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tracker_and_aura_updates(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let shape = new_token(&pool, layer_id).await;
    let tracker = TrackerRepo::create(&pool, shape.uuid, &new_tracker("HP", false))
        .await
        .unwrap();
    let aura = AuraRepo::create(&pool, shape.uuid, &new_aura("Torch"))
        .await
        .unwrap();

    let tracker = TrackerRepo::update(
        &pool,
        tracker.uuid,
        &UpdateTracker {
            value: Some(12),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(tracker.value, 12);
    assert_eq!(tracker.maxvalue, 5, "value may exceed maxvalue");
    assert!(!tracker.visible);

    let aura = AuraRepo::update(
        &pool,
        aura.uuid,
        &UpdateAura {
            visible: Some(false),
            dim: Some(15),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!aura.visible);
    assert_eq!(aura.dim, 15);
    assert_eq!(aura.name, "Torch");

    let visible = AuraRepo::list_for_shape(&pool, shape.uuid, true).await.unwrap();
    assert!(visible.is_empty());
    let all = AuraRepo::list_for_shape(&pool, shape.uuid, false).await.unwrap();
    assert_eq!(all.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_grant_is_idempotent(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let shape = new_token(&pool, layer_id).await;
    let alice = UserRepo::create(&pool, &CreateUser { name: "alice".to_string() })
        .await
        .unwrap();

    assert!(ShapeOwnerRepo::add(&pool, shape.uuid, alice.id).await.unwrap().is_some());
    assert!(ShapeOwnerRepo::add(&pool, shape.uuid, alice.id).await.unwrap().is_none());
    assert_eq!(
        ShapeOwnerRepo::list_owner_names(&pool, shape.uuid).await.unwrap(),
        vec!["alice".to_string()]
    );

    assert!(ShapeOwnerRepo::remove(&pool, shape.uuid, alice.id).await.unwrap());
    assert!(!ShapeOwnerRepo::remove(&pool, shape.uuid, alice.id).await.unwrap());
    assert!(ShapeOwnerRepo::list_for_shape(&pool, shape.uuid).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_removes_shape_subtype_and_children(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let shape = new_token(&pool, layer_id).await;
    let alice = UserRepo::create(&pool, &CreateUser { name: "alice".to_string() })
        .await
        .unwrap();
    ShapeOwnerRepo::add(&pool, shape.uuid, alice.id).await.unwrap();
    TrackerRepo::create(&pool, shape.uuid, &new_tracker("HP", true)).await.unwrap();
    AuraRepo::create(&pool, shape.uuid, &new_aura("Light")).await.unwrap();

    assert!(ShapeRepo::delete(&pool, shape.uuid).await.unwrap());

    for table in ["shapes", "circular_tokens", "trackers", "auras", "shape_owners"] {
        assert_eq!(count(&pool, table, shape.uuid).await, 0, "{table} should be empty");
    }
    assert!(!ShapeRepo::delete(&pool, shape.uuid).await.unwrap());
    assert!(UserRepo::find_by_id(&pool, alice.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_layer_delete_cascades_to_shapes(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let shape = new_token(&pool, layer_id).await;
    TrackerRepo::create(&pool, shape.uuid, &new_tracker("HP", true)).await.unwrap();

    assert!(LayerRepo::delete(&pool, layer_id).await.unwrap());

    assert!(ShapeRepo::find_by_id(&pool, shape.uuid).await.unwrap().is_none());
    assert_eq!(count(&pool, "circular_tokens", shape.uuid).await, 0);
    assert_eq!(count(&pool, "trackers", shape.uuid).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tracker_delete(pool: PgPool) {
    let layer_id = new_layer(&pool).await;
    let shape = new_token(&pool, layer_id).await;
    let tracker = TrackerRepo::create(&pool, shape.uuid, &new_tracker("HP", true))
        .await
        .unwrap();

    assert!(TrackerRepo::delete(&pool, tracker.uuid).await.unwrap());
    assert!(TrackerRepo::find_by_id(&pool, tracker.uuid).await.unwrap().is_none());
    assert!(!TrackerRepo::delete(&pool, tracker.uuid).await.unwrap());
}
