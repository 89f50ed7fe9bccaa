pub mod display_record;
pub mod hospital;
pub mod municipality;
