use sea_orm::entity::prelude::*;

use crate::types::ScorekeepingCode;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scorekeeping_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub scoring_event_id: Uuid,
    pub code: ScorekeepingCode,
    #[sea_orm(column_type = "JsonBinary")]
    pub attributes: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scoring_event::Entity",
        from = "Column::ScoringEventId",
        to = "super::scoring_event::Column::Id",
        on_delete = "Cascade"
    )]
    ScoringEvent,
}

impl Related<super::scoring_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScoringEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
