mod call_analyzer_test;
