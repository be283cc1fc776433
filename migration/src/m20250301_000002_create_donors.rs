use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Donors {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    DateOfBirth,
    BloodType,
    Weight,
    Gender,
    LastDonationDate,
    HasDisease,
    DiseaseDetails,
    IsOnMedication,
    HadRecentSurgery,
    District,
    Area,
    Address,
    EmergencyContact,
    TermsAccepted,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donors::FullName).string().not_null())
                    .col(ColumnDef::new(Donors::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Donors::Phone).string().not_null())
                    .col(ColumnDef::new(Donors::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Donors::BloodType).string_len(8).not_null())
                    .col(ColumnDef::new(Donors::Weight).double().not_null())
                    .col(ColumnDef::new(Donors::Gender).string().not_null())
                    .col(ColumnDef::new(Donors::LastDonationDate).date().null())
                    .col(
                        ColumnDef::new(Donors::HasDisease)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Donors::DiseaseDetails).text().null())
                    .col(
                        ColumnDef::new(Donors::IsOnMedication)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Donors::HadRecentSurgery)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Donors::District).string().not_null())
                    .col(ColumnDef::new(Donors::Area).string().not_null())
                    .col(ColumnDef::new(Donors::Address).text().not_null())
                    .col(ColumnDef::new(Donors::EmergencyContact).string().not_null())
                    .col(
                        ColumnDef::new(Donors::TermsAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Donors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 搜索筛选
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donors_blood_type_district")
                    .table(Donors::Table)
                    .col(Donors::BloodType)
                    .col(Donors::District)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donors::Table).to_owned())
            .await?;
        Ok(())
    }
}
