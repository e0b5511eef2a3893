//! REST API endpoint tests

mod chat_tests;
