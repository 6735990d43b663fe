pub mod set_service;
