use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub start: DateTimeUtc,
    pub end: DateTimeUtc,
    pub arrive: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scoring_event::Entity")]
    ScoringEvent,
}

impl Related<super::scoring_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScoringEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
