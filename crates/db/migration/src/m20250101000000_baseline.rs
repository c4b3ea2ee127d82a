use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(Games::Table)
                    .col(uuid_pk_col(Games::Id))
                    .col(instant_col(Games::Start))
                    .col(instant_col(Games::End))
                    .col(instant_col(Games::Arrive))
                    .col(timestamp_col(Games::CreatedAt))
                    .col(timestamp_col(Games::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(ScoringEvents::Table)
                    .col(uuid_pk_col(ScoringEvents::Id))
                    .col(uuid_col(ScoringEvents::GameId))
                    .col(instant_col(ScoringEvents::Timestamp))
                    .col(timestamp_col(ScoringEvents::CreatedAt))
                    .col(timestamp_col(ScoringEvents::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scoring_events_game_id")
                            .from(ScoringEvents::Table, ScoringEvents::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scoring_events_game_id")
                    .table(ScoringEvents::Table)
                    .col(ScoringEvents::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(ScorekeepingData::Table)
                    .col(
                        ColumnDef::new(ScorekeepingData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(uuid_col(ScorekeepingData::ScoringEventId))
                    .col(
                        ColumnDef::new(ScorekeepingData::Code)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScorekeepingData::Attributes)
                            .json_binary()
                            .not_null(),
                    )
                    .col(timestamp_col(ScorekeepingData::CreatedAt))
                    .col(timestamp_col(ScorekeepingData::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorekeeping_data_scoring_event_id")
                            .from(ScorekeepingData::Table, ScorekeepingData::ScoringEventId)
                            .to(ScoringEvents::Table, ScoringEvents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One scorekeeping row per scoring event.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scorekeeping_data_scoring_event_id")
                    .table(ScorekeepingData::Table)
                    .col(ScorekeepingData::ScoringEventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_scorekeeping_data_scoring_event_id")
                    .table(ScorekeepingData::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ScorekeepingData::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_scoring_events_game_id")
                    .table(ScoringEvents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ScoringEvents::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}

fn uuid_pk_col<T: Iden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn uuid_col<T: Iden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().to_owned()
}

fn instant_col<T: Iden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn timestamp_col<T: Iden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Start,
    End,
    Arrive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ScoringEvents {
    Table,
    Id,
    GameId,
    Timestamp,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ScorekeepingData {
    Table,
    Id,
    ScoringEventId,
    Code,
    Attributes,
    CreatedAt,
    UpdatedAt,
}
