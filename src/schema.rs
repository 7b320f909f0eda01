diesel::table! {
    users (id) {
        id -> Text,
        name -> Text,
        email -> Text,
        password -> Text,
        avatar -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    folders (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        icon -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    notes (id) {
        id -> Text,
        user_id -> Text,
        folder_id -> Nullable<Text>,
        title -> Text,
        content -> Text,
        is_pinned -> Bool,
        is_locked -> Bool,
        is_trashed -> Bool,
        trashed_at -> Nullable<Timestamp>,
        tags -> Text,
        is_shared -> Bool,
        share_token -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    versions (id) {
        id -> Text,
        note_id -> Text,
        user_id -> Text,
        title -> Text,
        content -> Text,
        version_number -> Integer,
        created_at -> Timestamp,
    }
}

diesel::joinable!(folders -> users (user_id));
diesel::joinable!(notes -> folders (folder_id));
diesel::joinable!(versions -> notes (note_id));

diesel::allow_tables_to_appear_in_same_query!(users, folders, notes, versions);
