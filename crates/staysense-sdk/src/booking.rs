//! Booking request model
//!
//! A `BookingRequest` carries every attribute the cancellation model reads,
//! with the defaults a booking form starts from. Requests convert into a
//! `Frame` laid out by [`booking_schema`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use staysense_core::{FieldType, Frame, Record, Schema, SchemaField, Value};

/// One booking to score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BookingRequest {
    pub hotel: String,
    pub lead_time: f64,
    pub arrival_date_year: i64,
    pub arrival_date_month: i64,
    pub arrival_date_day_of_month: i64,
    pub arrival_date_week_number: i64,
    pub stays_in_weekend_nights: i64,
    pub stays_in_week_nights: i64,
    pub adults: i64,
    pub children: f64,
    pub babies: i64,
    pub meal: String,
    pub market_segment: String,
    pub distribution_channel: String,
    pub is_repeated_guest: i64,
    pub previous_cancellations: i64,
    pub previous_bookings_not_canceled: i64,
    pub reserved_room_type: String,
    pub booking_changes: i64,
    pub deposit_type: String,
    pub agent: i64,
    pub company: i64,
    pub days_in_waiting_list: i64,
    pub customer_type: String,
    /// Average daily rate
    #[serde(rename = "ADR")]
    pub adr: f64,
    pub total_of_special_requests: i64,
}

impl Default for BookingRequest {
    fn default() -> Self {
        Self {
            hotel: "H1".to_string(),
            lead_time: 0.0,
            arrival_date_year: 2017,
            arrival_date_month: 1,
            arrival_date_day_of_month: 1,
            arrival_date_week_number: 1,
            stays_in_weekend_nights: 1,
            stays_in_week_nights: 2,
            adults: 1,
            children: 0.0,
            babies: 0,
            meal: "BB".to_string(),
            market_segment: "Direct".to_string(),
            distribution_channel: "TA/TO".to_string(),
            is_repeated_guest: 0,
            previous_cancellations: 0,
            previous_bookings_not_canceled: 0,
            reserved_room_type: "A".to_string(),
            booking_changes: 0,
            deposit_type: "No Deposit".to_string(),
            agent: 9,
            company: 40,
            days_in_waiting_list: 0,
            customer_type: "Transient".to_string(),
            adr: 100.0,
            total_of_special_requests: 0,
        }
    }
}

impl BookingRequest {
    /// The request as a record keyed by column name
    pub fn to_record(&self) -> Record {
        let fields: [(&str, Value); 26] = [
            ("LeadTime", self.lead_time.into()),
            ("ArrivalDateYear", self.arrival_date_year.into()),
            ("ArrivalDateMonth", self.arrival_date_month.into()),
            ("ArrivalDateDayOfMonth", self.arrival_date_day_of_month.into()),
            ("ArrivalDateWeekNumber", self.arrival_date_week_number.into()),
            ("StaysInWeekendNights", self.stays_in_weekend_nights.into()),
            ("StaysInWeekNights", self.stays_in_week_nights.into()),
            ("Adults", self.adults.into()),
            ("Children", self.children.into()),
            ("Babies", self.babies.into()),
            ("ADR", self.adr.into()),
            ("PreviousCancellations", self.previous_cancellations.into()),
            ("IsRepeatedGuest", self.is_repeated_guest.into()),
            ("Meal", self.meal.as_str().into()),
            ("MarketSegment", self.market_segment.as_str().into()),
            ("DistributionChannel", self.distribution_channel.as_str().into()),
            ("ReservedRoomType", self.reserved_room_type.as_str().into()),
            ("DepositType", self.deposit_type.as_str().into()),
            ("CustomerType", self.customer_type.as_str().into()),
            ("Agent", self.agent.into()),
            ("Company", self.company.into()),
            ("Hotel", self.hotel.as_str().into()),
            (
                "PreviousBookingsNotCanceled",
                self.previous_bookings_not_canceled.into(),
            ),
            ("TotalOfSpecialRequests", self.total_of_special_requests.into()),
            ("DaysInWaitingList", self.days_in_waiting_list.into()),
            ("BookingChanges", self.booking_changes.into()),
        ];
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// Convert requests into a batch laid out by the booking schema
    pub fn to_frame(requests: &[BookingRequest]) -> Result<Frame> {
        let records: Vec<Record> = requests.iter().map(Self::to_record).collect();
        Ok(Frame::from_records(&booking_schema(), &records)?)
    }
}

/// Column layout of a booking batch
pub fn booking_schema() -> Schema {
    let fields = [
        ("LeadTime", FieldType::Number),
        ("ArrivalDateYear", FieldType::Integer),
        ("ArrivalDateMonth", FieldType::Integer),
        ("ArrivalDateDayOfMonth", FieldType::Integer),
        ("ArrivalDateWeekNumber", FieldType::Integer),
        ("StaysInWeekendNights", FieldType::Integer),
        ("StaysInWeekNights", FieldType::Integer),
        ("Adults", FieldType::Integer),
        ("Children", FieldType::Number),
        ("Babies", FieldType::Integer),
        ("ADR", FieldType::Number),
        ("PreviousCancellations", FieldType::Integer),
        ("IsRepeatedGuest", FieldType::Integer),
        ("Meal", FieldType::Text),
        ("MarketSegment", FieldType::Text),
        ("DistributionChannel", FieldType::Text),
        ("ReservedRoomType", FieldType::Text),
        ("DepositType", FieldType::Text),
        ("CustomerType", FieldType::Text),
        ("Agent", FieldType::Integer),
        ("Company", FieldType::Integer),
        ("Hotel", FieldType::Text),
        ("PreviousBookingsNotCanceled", FieldType::Integer),
        ("TotalOfSpecialRequests", FieldType::Integer),
        ("DaysInWaitingList", FieldType::Integer),
        ("BookingChanges", FieldType::Integer),
    ];

    fields
        .into_iter()
        .fold(Schema::new("booking"), |schema, (name, field_type)| {
            schema.add_field(SchemaField::new(name, field_type).required())
        })
}
