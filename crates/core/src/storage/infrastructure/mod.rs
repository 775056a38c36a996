pub mod storage_http_store;
