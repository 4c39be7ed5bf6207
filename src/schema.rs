diesel::table! {
    terms (term) {
        term -> Text,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    term_relations (id) {
        id -> Integer,
        term_from -> Text,
        term_to -> Text,
        label -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(terms, term_relations,);
