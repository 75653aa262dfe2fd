//! Contrato del adaptador Postgres (requiere DATABASE_URL; sin ella cada test
//! se omite).


use bp_core::{BlueprintError, BlueprintPersistence};
use bp_domain::{Blueprint, Point};
use bp_persistence::schema::{blueprints, points};
use diesel::prelude::*;
use test_support::{unique_author, with_store};

fn bp(author: &str, name: &str, pts: &[(i32, i32)]) -> Blueprint {
    Blueprint::new(author, name, pts.iter().copied().map(Point::from).collect()).unwrap()
}

fn skip(test: &str) {
    eprintln!("skip {test} (no DATABASE_URL)");
}

#[test]
fn save_then_get_preserves_points_in_order() {
    let ran = with_store(|store, _| {
        let author = unique_author("roundtrip");
        let original = bp(&author, "house", &[(5, 5), (0, 0), (-1, 7), (3, 3)]);
        store.save_blueprint(&original).expect("save");
        let loaded = store.get_blueprint(&author, "house").expect("get");
        assert_eq!(loaded, original);
    });
    if ran.is_none() { skip("save_then_get_preserves_points_in_order"); }
}

#[test]
fn duplicate_save_is_rejected_without_overwrite() {
    let ran = with_store(|store, _| {
        let author = unique_author("dup");
        store.save_blueprint(&bp(&author, "house", &[(0, 0)])).expect("first save");
        let err = store.save_blueprint(&bp(&author, "house", &[(9, 9), (8, 8)])).unwrap_err();
        assert_eq!(err, BlueprintError::duplicate(&author, "house"));
        let kept = store.get_blueprint(&author, "house").expect("get");
        assert_eq!(kept.points(), &[Point::new(0, 0)]);
    });
    if ran.is_none() { skip("duplicate_save_is_rejected_without_overwrite"); }
}

#[test]
fn add_point_appends_at_the_end() {
    let ran = with_store(|store, _| {
        let author = unique_author("append");
        store.save_blueprint(&bp(&author, "house", &[(0, 0), (1, 1)])).expect("save");
        for i in 2..6 {
            store.add_point(&author, "house", i, i).expect("add_point");
        }
        let loaded = store.get_blueprint(&author, "house").expect("get");
        let expected: Vec<Point> = (0..6).map(|i| Point::new(i, i)).collect();
        assert_eq!(loaded.points(), expected.as_slice());
    });
    if ran.is_none() { skip("add_point_appends_at_the_end"); }
}

#[test]
fn add_point_on_empty_blueprint_starts_at_order_zero() {
    let ran = with_store(|store, pool| {
        let author = unique_author("empty");
        store.save_blueprint(&bp(&author, "blank", &[])).expect("save");
        store.add_point(&author, "blank", 4, 2).expect("add_point");
        let mut conn = pool.get().expect("conn");
        let orders: Vec<i32> = points::table.inner_join(blueprints::table)
                                            .filter(blueprints::author.eq(&author))
                                            .select(points::point_order)
                                            .load(&mut conn)
                                            .expect("orders");
        assert_eq!(orders, vec![0]);
    });
    if ran.is_none() { skip("add_point_on_empty_blueprint_starts_at_order_zero"); }
}

#[test]
fn add_point_on_missing_blueprint_is_not_found() {
    let ran = with_store(|store, pool| {
        let author = unique_author("ghost");
        let err = store.add_point(&author, "nothing", 1, 1).unwrap_err();
        assert_eq!(err, BlueprintError::not_found(&author, "nothing"));
        let mut conn = pool.get().expect("conn");
        let count: i64 = blueprints::table.filter(blueprints::author.eq(&author))
                                          .count()
                                          .get_result(&mut conn)
                                          .expect("count");
        assert_eq!(count, 0);
    });
    if ran.is_none() { skip("add_point_on_missing_blueprint_is_not_found"); }
}

#[test]
fn by_author_returns_all_and_only_that_author() {
    let ran = with_store(|store, _| {
        let author = unique_author("many");
        let other = unique_author("other");
        store.save_blueprint(&bp(&author, "a", &[(1, 1)])).expect("save a");
        store.save_blueprint(&bp(&author, "b", &[(2, 2), (3, 3)])).expect("save b");
        store.save_blueprint(&bp(&other, "c", &[])).expect("save c");
        let found = store.get_blueprints_by_author(&author).expect("by author");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name(), "a");
        assert_eq!(found[1].points(), &[Point::new(2, 2), Point::new(3, 3)]);
        assert!(found.iter().all(|b| b.author() == author));
    });
    if ran.is_none() { skip("by_author_returns_all_and_only_that_author"); }
}

#[test]
fn by_author_without_blueprints_is_not_found() {
    let ran = with_store(|store, _| {
        let author = unique_author("nobody");
        let err = store.get_blueprints_by_author(&author).unwrap_err();
        assert_eq!(err, BlueprintError::author_not_found(&author));
    });
    if ran.is_none() { skip("by_author_without_blueprints_is_not_found"); }
}

#[test]
fn get_all_includes_saved_blueprints() {
    let ran = with_store(|store, _| {
        let author = unique_author("all");
        store.save_blueprint(&bp(&author, "one", &[(7, 7)])).expect("save");
        let all = store.get_all_blueprints().expect("all");
        let mine: Vec<&Blueprint> = all.iter().filter(|b| b.author() == author).collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].points(), &[Point::new(7, 7)]);
    });
    if ran.is_none() { skip("get_all_includes_saved_blueprints"); }
}

#[test]
fn delete_cascades_to_points() {
    let ran = with_store(|store, pool| {
        let author = unique_author("delete");
        store.save_blueprint(&bp(&author, "house", &[(0, 0), (1, 1), (2, 2)])).expect("save");
        let mut conn = pool.get().expect("conn");
        let bp_id: i64 = blueprints::table.filter(blueprints::author.eq(&author))
                                          .select(blueprints::id)
                                          .first(&mut conn)
                                          .expect("id");
        store.delete_blueprint(&author, "house").expect("delete");
        assert!(matches!(store.get_blueprint(&author, "house"), Err(BlueprintError::NotFound(_))));
        let orphans: i64 = points::table.filter(points::blueprint_id.eq(bp_id))
                                        .count()
                                        .get_result(&mut conn)
                                        .expect("count");
        assert_eq!(orphans, 0, "no deben quedar puntos huérfanos");
        let again = store.delete_blueprint(&author, "house").unwrap_err();
        assert_eq!(again, BlueprintError::not_found(&author, "house"));
    });
    if ran.is_none() { skip("delete_cascades_to_points"); }
}

#[test]
fn concurrent_appends_keep_distinct_order_keys() {
    let ran = with_store(|store, pool| {
        let author = unique_author("race");
        store.save_blueprint(&bp(&author, "house", &[])).expect("save");
        std::thread::scope(|s| {
            for t in 0..4 {
                let author = author.clone();
                s.spawn(move || {
                    for i in 0..5 {
                        store.add_point(&author, "house", t, i).expect("concurrent add_point");
                    }
                });
            }
        });
        let mut conn = pool.get().expect("conn");
        let mut orders: Vec<i32> = points::table.inner_join(blueprints::table)
                                                .filter(blueprints::author.eq(&author))
                                                .select(points::point_order)
                                                .load(&mut conn)
                                                .expect("orders");
        orders.sort_unstable();
        assert_eq!(orders, (0..20).collect::<Vec<i32>>());
    });
    if ran.is_none() { skip("concurrent_appends_keep_distinct_order_keys"); }
}

#[test]
fn nul_in_key_is_not_found_without_touching_the_store() {
    let ran = with_store(|store, _| {
        let author = unique_author("nul");
        store.save_blueprint(&bp(&author, "house", &[(0, 0)])).expect("save");
        assert_eq!(store.get_blueprint(&author, "x\0y").unwrap_err(), BlueprintError::not_found(&author, "x\0y"));
        assert_eq!(store.get_blueprints_by_author("a\0b").unwrap_err(), BlueprintError::author_not_found("a\0b"));
        assert_eq!(store.add_point(&author, "ho\0use", 1, 1).unwrap_err(), BlueprintError::not_found(&author, "ho\0use"));
        assert_eq!(store.delete_blueprint(&author, "ho\0use").unwrap_err(), BlueprintError::not_found(&author, "ho\0use"));
        assert_eq!(store.get_blueprint(&author, "house").expect("get").len(), 1);
    });
    if ran.is_none() { skip("nul_in_key_is_not_found_without_touching_the_store"); }
}
