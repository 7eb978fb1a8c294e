//! Repository tests against a real Postgres.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p gigboard-server -- --ignored
//!
//! `sqlx::test` creates a fresh database per test and applies the
//! embedded migrations.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use gigboard_server::db::{ArtistRepo, DbError, ShowRepo, VenueRepo};
use gigboard_server::models::{Genre, NewArtist, NewShow, NewVenue, StateCode};

fn venue(name: &str, city: &str, state: &str) -> NewVenue {
    NewVenue {
        name: name.into(),
        city: city.into(),
        state: StateCode::new(state).unwrap(),
        address: "1015 Folsom Street".into(),
        phone: Some("123-123-1234".into()),
        genres: vec![Genre::Jazz, Genre::Reggae],
        image_link: None,
        facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
        website: None,
        seeking_talent: true,
        seeking_description: Some("We are on the lookout for a local artist".into()),
    }
}

fn artist(name: &str) -> NewArtist {
    NewArtist {
        name: name.into(),
        city: "San Francisco".into(),
        state: StateCode::new("CA").unwrap(),
        phone: None,
        genres: vec![Genre::RockNRoll],
        image_link: Some("https://images.example.com/petals.jpg".into()),
        facebook_link: None,
        website: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn created_venue_is_retrievable(pool: PgPool) {
    let repo = VenueRepo::new(&pool);
    let created = repo.create(&venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "The Musical Hop");
    assert_eq!(fetched.state, "CA");
    assert_eq!(fetched.genres, vec!["Jazz", "Reggae"]);
    assert!(fetched.seeking_talent);
    assert_eq!(fetched.image_link, None);
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn created_artist_and_show_are_retrievable(pool: PgPool) {
    let v = VenueRepo::new(&pool).create(&venue("The Hop", "San Francisco", "CA")).await.unwrap();
    let a = ArtistRepo::new(&pool).create(&artist("Guns N Petals")).await.unwrap();
    assert_eq!(ArtistRepo::new(&pool).get(a.id).await.unwrap(), a);

    let start = Utc::now() + Duration::days(7);
    let show = ShowRepo::new(&pool)
        .create(&NewShow {
            venue_id: v.id,
            artist_id: a.id,
            start_time: start,
        })
        .await
        .unwrap();

    let listed = ShowRepo::new(&pool).list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, show.id);
    assert_eq!(listed[0].venue_name, "The Hop");
    assert_eq!(listed[0].artist_name, "Guns N Petals");
    assert_eq!(listed[0].start_time.timestamp(), start.timestamp());
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn detail_partitions_shows_around_now(pool: PgPool) {
    let v = VenueRepo::new(&pool).create(&venue("The Hop", "San Francisco", "CA")).await.unwrap();
    let a = ArtistRepo::new(&pool).create(&artist("Guns N Petals")).await.unwrap();
    let now = Utc::now();

    for offset in [-30, -1, 1, 2, 90] {
        ShowRepo::new(&pool)
            .create(&NewShow {
                venue_id: v.id,
                artist_id: a.id,
                start_time: now + Duration::days(offset),
            })
            .await
            .unwrap();
    }

    let venue_detail = VenueRepo::new(&pool).detail(v.id, now).await.unwrap();
    assert_eq!(venue_detail.shows.past_count(), 2);
    assert_eq!(venue_detail.shows.upcoming_count(), 3);
    assert!(venue_detail.shows.past.iter().all(|s| s.start_time < now));
    assert!(venue_detail.shows.upcoming.iter().all(|s| s.start_time >= now));

    let artist_detail = ArtistRepo::new(&pool).detail(a.id, now).await.unwrap();
    assert_eq!(
        artist_detail.shows.past_count() + artist_detail.shows.upcoming_count(),
        5
    );
    assert_eq!(artist_detail.shows.upcoming[0].venue_name, "The Hop");
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn listings_count_only_upcoming_shows(pool: PgPool) {
    let venues = VenueRepo::new(&pool);
    let hop = venues.create(&venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();
    venues.create(&venue("Park Square Live Music", "San Francisco", "CA")).await.unwrap();
    venues.create(&venue("The Dueling Pianos Bar", "New York", "NY")).await.unwrap();
    let a = ArtistRepo::new(&pool).create(&artist("Guns N Petals")).await.unwrap();
    let now = Utc::now();

    for offset in [-3, 4, 5] {
        ShowRepo::new(&pool)
            .create(&NewShow {
                venue_id: hop.id,
                artist_id: a.id,
                start_time: now + Duration::days(offset),
            })
            .await
            .unwrap();
    }

    let areas = venues.areas(now).await.unwrap();
    assert_eq!(areas.len(), 2);
    // ordered by state: CA before NY
    assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("San Francisco", "CA"));
    assert_eq!(areas[0].venues.len(), 2);
    assert_eq!(areas[0].venues[0].id, hop.id);
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 2);
    assert_eq!(areas[0].venues[1].num_upcoming_shows, 0);
    assert_eq!(areas[1].state, "NY");

    let artists = ArtistRepo::new(&pool).list(now).await.unwrap();
    assert_eq!(artists[0].num_upcoming_shows, 2);
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn search_matches_substrings_ignoring_case(pool: PgPool) {
    let venues = VenueRepo::new(&pool);
    let names = [
        "The Musical Hop",
        "Park Square Live Music & Coffee",
        "The Dueling Pianos Bar",
        "100% Vinyl",
    ];
    for name in names {
        venues.create(&venue(name, "San Francisco", "CA")).await.unwrap();
    }
    let now = Utc::now();

    for term in ["hop", "MUSIC", "the", "%", "_", "", "zzz"] {
        let found: Vec<String> = venues
            .search(term, now)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        let expected: Vec<String> = names
            .iter()
            .filter(|n| n.to_lowercase().contains(&term.to_lowercase()))
            .map(|n| n.to_string())
            .collect();
        assert_eq!(found, expected, "term {term:?}");
    }

    let artists = ArtistRepo::new(&pool);
    artists.create(&artist("Guns N Petals")).await.unwrap();
    artists.create(&artist("Matt Quevedo")).await.unwrap();
    artists.create(&artist("The Wild Sax Band")).await.unwrap();
    let found = artists.search("A", now).await.unwrap();
    assert_eq!(found.len(), 3);
    let found = artists.search("band", now).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "The Wild Sax Band");
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn deleting_a_venue_removes_its_shows(pool: PgPool) {
    let venues = VenueRepo::new(&pool);
    let doomed = venues.create(&venue("The Hop", "San Francisco", "CA")).await.unwrap();
    let kept = venues.create(&venue("Park Square", "San Francisco", "CA")).await.unwrap();
    let a = ArtistRepo::new(&pool).create(&artist("Guns N Petals")).await.unwrap();

    for venue_id in [doomed.id, doomed.id, kept.id] {
        ShowRepo::new(&pool)
            .create(&NewShow {
                venue_id,
                artist_id: a.id,
                start_time: Utc::now() + Duration::days(1),
            })
            .await
            .unwrap();
    }

    let deleted = venues.delete(doomed.id).await.unwrap();
    assert_eq!(deleted.name, "The Hop");
    assert_eq!(deleted.shows_removed, 2);

    assert!(matches!(
        venues.get(doomed.id).await,
        Err(DbError::NotFound { resource: "venue", .. })
    ));
    assert!(matches!(
        venues.delete(doomed.id).await,
        Err(DbError::NotFound { .. })
    ));

    let remaining = ShowRepo::new(&pool).list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].venue_id, kept.id);
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn failed_update_leaves_row_unchanged(pool: PgPool) {
    let venues = VenueRepo::new(&pool);
    let original = venues.create(&venue("The Hop", "San Francisco", "CA")).await.unwrap();

    // Bypasses form validation; the CHECK constraint still refuses it.
    let mut bad = venue("The Hop", "San Francisco", "CA");
    bad.name = "   ".into();
    bad.city = "Oakland".into();

    let err = venues.update(original.id, &bad).await.unwrap_err();
    assert!(matches!(err, DbError::Constraint { .. }), "{err:?}");
    assert_eq!(venues.get(original.id).await.unwrap(), original);

    let err = ArtistRepo::new(&pool).update(9999, &artist("Nobody")).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "artist", .. }));
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn show_with_missing_reference_is_not_written(pool: PgPool) {
    let v = VenueRepo::new(&pool).create(&venue("The Hop", "San Francisco", "CA")).await.unwrap();

    let err = ShowRepo::new(&pool)
        .create(&NewShow {
            venue_id: v.id,
            artist_id: 4242,
            start_time: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "artist", .. }));

    let err = ShowRepo::new(&pool)
        .create(&NewShow {
            venue_id: 4242,
            artist_id: 1,
            start_time: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "venue", .. }));

    assert!(ShowRepo::new(&pool).list().await.unwrap().is_empty());
}

#[sqlx::test(migrator = "gigboard_server::MIGRATOR")]
#[ignore = "requires database"]
async fn double_booking_is_permitted(pool: PgPool) {
    let v = VenueRepo::new(&pool).create(&venue("The Hop", "San Francisco", "CA")).await.unwrap();
    let a = ArtistRepo::new(&pool).create(&artist("Guns N Petals")).await.unwrap();
    let b = ArtistRepo::new(&pool).create(&artist("Matt Quevedo")).await.unwrap();
    let start = Utc::now() + Duration::days(3);

    for artist_id in [a.id, b.id] {
        ShowRepo::new(&pool)
            .create(&NewShow {
                venue_id: v.id,
                artist_id,
                start_time: start,
            })
            .await
            .unwrap();
    }

    assert_eq!(ShowRepo::new(&pool).list().await.unwrap().len(), 2);
}
