//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lowercased.
    users (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        password_hash -> Text,
        #[max_length = 16]
        role -> Varchar,
        #[max_length = 3]
        blood_type -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One stock counter per blood type. `quantity` never drops below zero.
    blood_inventory (blood_type) {
        #[max_length = 3]
        blood_type -> Varchar,
        quantity -> Int4,
    }
}

diesel::table! {
    /// Append-only donation log.
    donations (id) {
        id -> Uuid,
        donor_id -> Uuid,
        #[max_length = 3]
        blood_type -> Varchar,
        donation_date -> Timestamptz,
        quantity -> Int4,
        #[max_length = 16]
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    blood_requests (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        #[max_length = 3]
        blood_type -> Varchar,
        location -> Text,
        #[max_length = 16]
        urgency -> Varchar,
        #[max_length = 16]
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(donations -> users (donor_id));
diesel::joinable!(blood_requests -> users (recipient_id));

diesel::allow_tables_to_appear_in_same_query!(users, blood_inventory, donations, blood_requests);
