pub mod warehouse_http_sink;
