mod backend_mock;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - backend_mock: the API actor against a local stand-in for the backend
// - smoke_tests: end-to-end parsing and rendering of backend payloads
