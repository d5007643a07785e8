//! Diesel table definitions for the shop tables.
//!
//! The `roads` and `regions` tables hold PostGIS columns Diesel has no types
//! for; they are reached through `sql_query` in the spatial adapters.

diesel::table! {
    users (id) {
        id -> Uuid,
        username -> Text,
        email -> Text,
        role -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    products (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        price -> Float8,
        category -> Text,
        stock -> Int8,
        image_url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, products);
