use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // users: unique email
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // beneficiaries: generated ids are random, so storage has the final word on uniqueness
    {
        let col = db.collection::<mongodb::bson::Document>("beneficiaries");
        let model = IndexModel::builder()
            .keys(doc! { "beneficiaryId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // beneficiaries: list per user, newest first
    {
        let col = db.collection::<mongodb::bson::Document>("beneficiaries");
        let model = IndexModel::builder()
            .keys(doc! { "userId": 1, "createdAt": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
