//! Repository behaviour against a real database.

use chrono::NaiveDate;
use clinic_core::holiday::HolidayType;
use clinic_core::page_block::{prepare_blocks, BlockDraft};
use clinic_db::models::holiday::HolidayFilter;
use clinic_db::models::section::UpdateSection;
use clinic_db::models::section_item::CreateSectionItem;
use clinic_db::models::testimonial::CreateTestimonial;
use clinic_db::repositories::holiday_repo::NewHoliday;
use clinic_db::repositories::page_block_repo::PageBlockError;
use clinic_db::repositories::{
    AdminSessionRepo, AdminUserRepo, HolidayRepo, PageBlockRepo, SectionItemRepo, SectionRepo,
    TestimonialRepo,
};
use serde_json::json;
use sqlx::PgPool;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn block(block_type: &str) -> BlockDraft {
    BlockDraft {
        id: None,
        block_type: block_type.to_string(),
        content: json!({ "kind": block_type }),
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn section_upsert_patches_only_provided_fields(pool: PgPool) {
    let first = UpdateSection {
        heading: Some("Hello".into()),
        description: Some("World".into()),
        image_url: None,
    };
    let created = SectionRepo::upsert(&pool, "eye-care", "hero", &first).await.unwrap();

    let patch = UpdateSection {
        heading: Some("Changed".into()),
        ..Default::default()
    };
    let updated = SectionRepo::upsert(&pool, "eye-care", "hero", &patch).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.heading, "Changed");
    assert_eq!(updated.description, "World");
}

// ---------------------------------------------------------------------------
// Section items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn section_items_append_and_order(pool: PgPool) {
    for title in ["First", "Second"] {
        let dto = CreateSectionItem {
            title: title.into(),
            description: None,
            icon: None,
            display_order: None,
        };
        SectionItemRepo::create(&pool, "eye-care", "conditions", &dto)
            .await
            .unwrap();
    }
    let pinned = CreateSectionItem {
        title: "Zeroth".into(),
        description: None,
        icon: Some("eye".into()),
        display_order: Some(-1),
    };
    SectionItemRepo::create(&pool, "eye-care", "conditions", &pinned)
        .await
        .unwrap();

    let items = SectionItemRepo::list(&pool, "eye-care", "conditions").await.unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Zeroth", "First", "Second"]);
    assert_eq!(items[1].display_order, 0);
    assert_eq!(items[2].display_order, 1);

    assert!(SectionItemRepo::list(&pool, "gynecology", "conditions")
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn testimonials_filter_by_department(pool: PgPool) {
    for (department, author) in [("eye-care", "Asha"), ("gynecology", "Meera")] {
        let dto = CreateTestimonial {
            department: department.into(),
            author_name: author.into(),
            content: "Great care".into(),
            rating: None,
            display_order: None,
        };
        TestimonialRepo::create(&pool, &dto).await.unwrap();
    }

    let eye = TestimonialRepo::list(&pool, Some("eye-care")).await.unwrap();
    assert_eq!(eye.len(), 1);
    assert_eq!(eye[0].author_name, "Asha");
    assert_eq!(eye[0].rating, 5);
    assert_eq!(TestimonialRepo::list(&pool, None).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Holidays
// ---------------------------------------------------------------------------

async fn seed_holidays(pool: &PgPool) {
    let rows = [
        (day(2024, 1, 26), HolidayType::National, None),
        (day(2024, 3, 8), HolidayType::Manual, Some("all")),
        (day(2024, 4, 2), HolidayType::Doctor, Some("dr-rao")),
        (day(2024, 5, 1), HolidayType::Doctor, Some("dr-mehta")),
    ];
    for (date, holiday_type, doctor) in rows {
        let input = NewHoliday {
            holiday_date: date,
            name: format!("{holiday_type} {date}"),
            holiday_type,
            doctor_key: doctor.map(str::to_string),
            description: None,
        };
        HolidayRepo::create(pool, &input).await.unwrap();
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn holiday_doctor_filter_keeps_clinic_wide_rows(pool: PgPool) {
    seed_holidays(&pool).await;

    let filter = HolidayFilter {
        doctor_key: Some("dr-rao".into()),
        ..Default::default()
    };
    let rows = HolidayRepo::list(&pool, &filter).await.unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|h| h.holiday_date).collect();
    assert_eq!(dates, vec![day(2024, 1, 26), day(2024, 3, 8), day(2024, 4, 2)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn holiday_type_and_range_filters(pool: PgPool) {
    seed_holidays(&pool).await;

    let manual = HolidayFilter {
        holiday_type: Some(HolidayType::Manual),
        ..Default::default()
    };
    let rows = HolidayRepo::list(&pool, &manual).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].holiday_type, HolidayType::Manual);

    let spring = HolidayFilter {
        from: Some(day(2024, 3, 1)),
        to: Some(day(2024, 4, 30)),
        ..Default::default()
    };
    assert_eq!(HolidayRepo::list(&pool, &spring).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Admin users and sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn admin_username_is_unique(pool: PgPool) {
    AdminUserRepo::create(&pool, "admin", "hash").await.unwrap();
    let err = AdminUserRepo::create(&pool, "admin", "hash").await.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_admin_users_username"));
}

#[sqlx::test(migrations = "./migrations")]
async fn sessions_are_removed_with_their_admin(pool: PgPool) {
    let admin = AdminUserRepo::create(&pool, "admin", "hash").await.unwrap();
    let expires = chrono::Utc::now() + chrono::Duration::hours(1);
    let session = AdminSessionRepo::create(&pool, admin.id, expires).await.unwrap();

    sqlx::query("DELETE FROM admin_users WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(AdminSessionRepo::find_by_id(&pool, session.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn cleanup_removes_only_expired_sessions(pool: PgPool) {
    let admin = AdminUserRepo::create(&pool, "admin", "hash").await.unwrap();
    let now = chrono::Utc::now();
    let live = AdminSessionRepo::create(&pool, admin.id, now + chrono::Duration::hours(1))
        .await
        .unwrap();
    AdminSessionRepo::create(&pool, admin.id, now - chrono::Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(AdminSessionRepo::cleanup_expired(&pool).await.unwrap(), 1);
    assert!(AdminSessionRepo::find_by_id(&pool, live.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Page blocks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn save_all_then_fetch_preserves_order(pool: PgPool) {
    let blocks = prepare_blocks("/eye-care", vec![block("hero"), block("text"), block("cta")]).unwrap();
    PageBlockRepo::save_all(&pool, "/eye-care", &blocks).await.unwrap();

    let stored = PageBlockRepo::list_for_page(&pool, "/eye-care").await.unwrap();
    assert_eq!(stored.len(), 3);
    for (position, (row, sent)) in stored.iter().zip(&blocks).enumerate() {
        assert_eq!(row.id, sent.id);
        assert_eq!(row.order_index, position as i32);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn save_all_prunes_missing_and_keeps_other_pages(pool: PgPool) {
    let first = prepare_blocks("/a", vec![block("hero"), block("text")]).unwrap();
    PageBlockRepo::save_all(&pool, "/a", &first).await.unwrap();
    let other = prepare_blocks("/b", vec![block("hero")]).unwrap();
    PageBlockRepo::save_all(&pool, "/b", &other).await.unwrap();

    // Keep the second block only, now first.
    let kept = BlockDraft {
        id: Some(first[1].id),
        block_type: "text".into(),
        content: json!({ "edited": true }),
    };
    let second = prepare_blocks("/a", vec![kept]).unwrap();
    let pruned = PageBlockRepo::save_all(&pool, "/a", &second).await.unwrap();
    assert_eq!(pruned, 1);

    let stored = PageBlockRepo::list_for_page(&pool, "/a").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first[1].id);
    assert_eq!(stored[0].order_index, 0);
    assert_eq!(stored[0].content, json!({ "edited": true }));

    assert_eq!(PageBlockRepo::list_for_page(&pool, "/b").await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn save_all_cannot_take_a_block_from_another_page(pool: PgPool) {
    let on_b = prepare_blocks("/b", vec![block("hero")]).unwrap();
    PageBlockRepo::save_all(&pool, "/b", &on_b).await.unwrap();
    let on_a = prepare_blocks("/a", vec![block("text")]).unwrap();
    PageBlockRepo::save_all(&pool, "/a", &on_a).await.unwrap();

    let stolen = BlockDraft {
        id: Some(on_b[0].id),
        block_type: "hero".into(),
        content: json!({ "moved": true }),
    };
    let attempt = prepare_blocks("/a", vec![block("cta"), stolen]).unwrap();
    let err = PageBlockRepo::save_all(&pool, "/a", &attempt).await.unwrap_err();
    assert!(matches!(err, PageBlockError::ForeignBlock(id) if id == on_b[0].id));

    // Both pages are exactly as before.
    let b = PageBlockRepo::list_for_page(&pool, "/b").await.unwrap();
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].id, on_b[0].id);
    assert_eq!(b[0].content, json!({ "kind": "hero" }));
    let a = PageBlockRepo::list_for_page(&pool, "/a").await.unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].id, on_a[0].id);
}

#[sqlx::test(migrations = "./migrations")]
async fn upsert_cannot_move_a_block_between_pages(pool: PgPool) {
    let on_b = prepare_blocks("/b", vec![block("hero")]).unwrap();
    PageBlockRepo::save_all(&pool, "/b", &on_b).await.unwrap();

    let mut moved = on_b[0].clone();
    moved.page_path = "/a".into();
    let err = PageBlockRepo::upsert(&pool, &moved).await.unwrap_err();
    assert!(matches!(err, PageBlockError::ForeignBlock(_)));
    assert_eq!(PageBlockRepo::list_for_page(&pool, "/b").await.unwrap().len(), 1);
    assert!(PageBlockRepo::list_for_page(&pool, "/a").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn save_all_with_empty_list_clears_page(pool: PgPool) {
    let blocks = prepare_blocks("/a", vec![block("hero")]).unwrap();
    PageBlockRepo::save_all(&pool, "/a", &blocks).await.unwrap();
    PageBlockRepo::save_all(&pool, "/a", &[]).await.unwrap();
    assert!(PageBlockRepo::list_for_page(&pool, "/a").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_for_page_reports_count(pool: PgPool) {
    let blocks = prepare_blocks("/a", vec![block("hero"), block("text")]).unwrap();
    PageBlockRepo::save_all(&pool, "/a", &blocks).await.unwrap();
    assert_eq!(PageBlockRepo::delete_for_page(&pool, "/a").await.unwrap(), 2);
    assert_eq!(PageBlockRepo::delete_for_page(&pool, "/a").await.unwrap(), 0);
}
