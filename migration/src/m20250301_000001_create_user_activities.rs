use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum UserActivities {
    Table,
    Id,
    UserId,
    Email,
    LoginMethod,
    ActivityType,
    Name,
    Phone,
    Timestamp,
    UserAgent,
    Platform,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("activity_type"))
                    .values(vec![Alias::new("login"), Alias::new("register")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserActivities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserActivities::UserId).string().not_null())
                    .col(ColumnDef::new(UserActivities::Email).string().not_null())
                    .col(ColumnDef::new(UserActivities::LoginMethod).string().not_null())
                    .col(
                        ColumnDef::new(UserActivities::ActivityType)
                            .custom(Alias::new("activity_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserActivities::Name).string().null())
                    .col(ColumnDef::new(UserActivities::Phone).string().null())
                    .col(
                        ColumnDef::new(UserActivities::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(ColumnDef::new(UserActivities::UserAgent).text().null())
                    .col(ColumnDef::new(UserActivities::Platform).string().null())
                    .to_owned(),
            )
            .await?;

        // 注册记录必须带姓名
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE user_activities \
                 ADD CONSTRAINT chk_user_activities_register_name \
                 CHECK (activity_type <> 'register' OR name IS NOT NULL)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_activities_user_id")
                    .table(UserActivities::Table)
                    .col(UserActivities::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_activities_timestamp")
                    .table(UserActivities::Table)
                    .col(UserActivities::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActivities::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("activity_type")).to_owned())
            .await?;
        Ok(())
    }
}
