mod bitrix_client;

pub use bitrix_client::BitrixClient;
