use chrono::{Local, Timelike};

#[deprecated(since = "0.2.0", note = "use chrono::Local::now().hour()")]
pub fn hour_now() -> u32 {
    Local::now().hour()
}

#[deprecated(since = "0.2.0", note = "use chrono::Local::now().minute()")]
pub fn minute_now() -> u32 {
    Local::now().minute()
}
