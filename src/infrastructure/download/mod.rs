mod reqwest_file_downloader;

pub use reqwest_file_downloader::ReqwestFileDownloader;
