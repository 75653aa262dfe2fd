//! Esquema Diesel (escrito a mano). Reemplazable con `diesel print-schema`.

diesel::table! {
    blueprints (id) {
        id -> BigInt,
        author -> Text,
        name -> Text,
    }
}

diesel::table! {
    points (id) {
        id -> BigInt,
        x -> Integer,
        y -> Integer,
        point_order -> Integer,
        blueprint_id -> BigInt,
    }
}

diesel::joinable!(points -> blueprints (blueprint_id));

diesel::allow_tables_to_appear_in_same_query!(
    blueprints,
    points,
);
