use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisements::Table)
                    .if_not_exists()
                    .col(pk_auto(Advertisements::Id))
                    .col(string(Advertisements::Title))
                    .col(text(Advertisements::Description))
                    .col(double(Advertisements::Price))
                    .col(
                        timestamp_with_time_zone(Advertisements::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(Advertisements::IsActive))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advertisements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Advertisements {
    Table,
    Id,
    Title,
    Description,
    Price,
    CreatedAt,
    IsActive,
}
