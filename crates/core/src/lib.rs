//! Face detection through a remote annotation service, with the results
//! forwarded to object storage or streamed into a warehouse table.
//!
//! Layout follows a domain/infrastructure split: `domain` modules hold the
//! contracts and the pure logic, `infrastructure` modules hold the HTTP
//! implementations of those contracts.

pub mod auth {
    pub mod domain {
        pub mod access_token_provider;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod annotate_transport;
        pub mod detection_record;
        pub mod face_detection_adapter;
    }
    pub mod infrastructure;
}

pub mod ingestion {
    pub mod domain {
        pub mod publish_result;
        pub mod retry_policy;
        pub mod row_publisher;
        pub mod row_sink;
        pub mod table_ref;
    }
    pub mod infrastructure;
}

pub mod rows {
    pub mod domain {
        pub mod row_parser;
    }
    pub mod infrastructure;
}

pub mod storage {
    pub mod domain {
        pub mod detection_exporter;
        pub mod object_store;
    }
    pub mod infrastructure;
}

pub mod pipeline;

pub mod shared;
